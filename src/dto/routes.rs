use crate::domain::route::{RouteDraft, RoutePlaceEntry};

const UNNAMED_PLACE: &str = "Unnamed place";

/// Row of the route table; `order` is one-based.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlaceRowDto {
    pub order: usize,
    pub place_id: String,
    pub name: String,
    pub cost: String,
}

impl From<&RoutePlaceEntry> for RoutePlaceRowDto {
    fn from(entry: &RoutePlaceEntry) -> Self {
        Self {
            order: entry.position.get() + 1,
            place_id: entry.place_id.as_str().to_string(),
            name: entry
                .name
                .as_ref()
                .map_or(UNNAMED_PLACE.to_string(), |n| n.as_str().to_string()),
            cost: format!("{:.2}", entry.cost.map_or(0.0, |c| c.get())),
        }
    }
}

/// Table and totals for a route being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverviewDto {
    pub name: String,
    pub rows: Vec<RoutePlaceRowDto>,
    pub total_cost: String,
    pub total_length_km: String,
    /// Set when places exist but none can be drawn on a map.
    pub missing_coordinates: bool,
}

impl From<&RouteDraft> for RouteOverviewDto {
    fn from(draft: &RouteDraft) -> Self {
        Self {
            name: draft.name().to_string(),
            rows: draft.entries().iter().map(RoutePlaceRowDto::from).collect(),
            total_cost: format!("{:.2}", draft.total_cost()),
            total_length_km: format!("{:.2}", draft.total_path_length_km()),
            missing_coordinates: !draft.is_empty() && draft.mappable_entries().next().is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route::PlaceAdditionInfo;
    use crate::domain::types::{PlaceCost, PlaceId, PlaceName};

    #[test]
    fn overview_formats_rows_and_totals() {
        let mut draft = RouteDraft::new();
        draft.rename("Trip");
        for (id, cost) in [("a", Some(100.0)), ("b", None)] {
            draft
                .add_place(PlaceAdditionInfo {
                    id: PlaceId::new(id).unwrap(),
                    name: PlaceName::new(id.to_uppercase()).unwrap(),
                    cost: cost.map(|c| PlaceCost::new(c).unwrap()),
                    coordinates: None,
                })
                .unwrap();
        }

        let overview = RouteOverviewDto::from(&draft);
        assert_eq!(overview.rows[0].order, 1);
        assert_eq!(overview.rows[1].cost, "0.00");
        assert_eq!(overview.total_cost, "100.00");
        assert_eq!(overview.total_length_km, "0.00");
        assert!(overview.missing_coordinates);
    }
}
