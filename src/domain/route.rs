use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::geo::{Coordinates, path_length_km};
use crate::domain::place::Place;
use crate::domain::types::{
    PlaceCost, PlaceId, PlaceName, Position, RouteId, RouteName, TypeConstraintError,
};

/// Route as listed on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    pub id: RouteId,
    pub name: String,
}

/// Persisted route with all of its places.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRoute {
    pub id: RouteId,
    pub name: String,
    pub places: Vec<RoutePlaceEntry>,
}

/// A place inside a route together with the display fields needed to render
/// it without fetching the place again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutePlaceEntry {
    pub place_id: PlaceId,
    pub position: Position,
    pub name: Option<PlaceName>,
    pub cost: Option<PlaceCost>,
    pub coordinates: Option<Coordinates>,
}

/// Everything needed to append a place to a [`RouteDraft`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceAdditionInfo {
    pub id: PlaceId,
    pub name: PlaceName,
    pub cost: Option<PlaceCost>,
    pub coordinates: Option<Coordinates>,
}

impl From<&Place> for PlaceAdditionInfo {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            cost: place.cost,
            coordinates: place.coordinates,
        }
    }
}

/// Reference to a place in the shape the server stores.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlaceRef {
    pub place_id: PlaceId,
    pub position: Position,
    pub name: Option<PlaceName>,
}

/// Validated full-replace body for creating or updating a route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSubmission {
    pub name: RouteName,
    pub places: Vec<RoutePlaceRef>,
}

/// Errors produced by draft mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteDraftError {
    #[error("place {0} is already part of the route")]
    DuplicatePlace(PlaceId),
    #[error("place {0} is not part of the route")]
    UnknownPlace(PlaceId),
}

/// Client-side route being composed or edited.
///
/// Positions are always exactly `0..n-1` in ascending order and a place id
/// appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteDraft {
    name: String,
    places: Vec<RoutePlaceEntry>,
    excluded: BTreeSet<PlaceId>,
}

impl RouteDraft {
    /// Empty draft for a new route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates a draft from a persisted route.
    ///
    /// Entries are ordered by their stored position and renumbered densely.
    /// Repeated place ids keep their first occurrence.
    pub fn from_route(route: UserRoute) -> Self {
        let mut places = route.places;
        places.sort_by_key(|p| p.position);

        let mut excluded = BTreeSet::new();
        places.retain(|p| excluded.insert(p.place_id.clone()));

        let mut draft = Self {
            name: route.name,
            places,
            excluded,
        };
        draft.compact();
        draft
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries ordered by position.
    pub fn entries(&self) -> &[RoutePlaceEntry] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Whether the place is already in the draft and must not be offered for
    /// selection again.
    pub fn is_excluded(&self, id: &PlaceId) -> bool {
        self.excluded.contains(id)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends a place after the current last position.
    pub fn add_place(
        &mut self,
        info: PlaceAdditionInfo,
    ) -> Result<&RoutePlaceEntry, RouteDraftError> {
        if self.excluded.contains(&info.id) {
            return Err(RouteDraftError::DuplicatePlace(info.id));
        }

        let position = self
            .places
            .iter()
            .map(|p| p.position)
            .max()
            .map_or(Position::new(0), Position::next);

        self.excluded.insert(info.id.clone());
        self.places.push(RoutePlaceEntry {
            place_id: info.id,
            position,
            name: Some(info.name),
            cost: info.cost,
            coordinates: info.coordinates,
        });
        self.places.sort_by_key(|p| p.position);

        let index = self
            .places
            .iter()
            .position(|p| p.position == position)
            .unwrap_or(self.places.len() - 1);
        Ok(&self.places[index])
    }

    /// Removes a place and renumbers the survivors without reordering them.
    pub fn remove_place(&mut self, id: &PlaceId) -> Option<RoutePlaceEntry> {
        let index = self.places.iter().position(|p| &p.place_id == id)?;
        let removed = self.places.remove(index);
        self.excluded.remove(id);
        self.compact();
        Some(removed)
    }

    /// Moves a place to `target` (clamped to the last position).
    pub fn move_place(&mut self, id: &PlaceId, target: Position) -> Result<(), RouteDraftError> {
        let index = self
            .places
            .iter()
            .position(|p| &p.place_id == id)
            .ok_or_else(|| RouteDraftError::UnknownPlace(id.clone()))?;
        let entry = self.places.remove(index);
        let target = target.get().min(self.places.len());
        self.places.insert(target, entry);
        self.compact();
        Ok(())
    }

    /// Sum of all costs, treating missing costs as zero.
    pub fn total_cost(&self) -> f64 {
        self.places
            .iter()
            .map(|p| p.cost.map_or(0.0, PlaceCost::get))
            .sum()
    }

    /// Path length in kilometres across the entries that carry coordinates,
    /// in position order.
    pub fn total_path_length_km(&self) -> f64 {
        let points: Vec<&Coordinates> = self
            .places
            .iter()
            .filter_map(|p| p.coordinates.as_ref())
            .collect();
        if points.len() < 2 {
            return 0.0;
        }
        path_length_km(points)
    }

    /// Entries that can be drawn on a map, in position order.
    pub fn mappable_entries(&self) -> impl Iterator<Item = &RoutePlaceEntry> {
        self.places.iter().filter(|p| p.coordinates.is_some())
    }

    /// Validated full-replace body. The name must not be blank.
    pub fn submission(&self) -> Result<RouteSubmission, TypeConstraintError> {
        Ok(RouteSubmission {
            name: RouteName::new(self.name.as_str())?,
            places: self
                .places
                .iter()
                .map(|p| RoutePlaceRef {
                    place_id: p.place_id.clone(),
                    position: p.position,
                    name: p.name.clone(),
                })
                .collect(),
        })
    }

    fn compact(&mut self) {
        for (index, place) in self.places.iter_mut().enumerate() {
            place.position = Position::new(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str, cost: Option<f64>, coords: Option<(f64, f64)>) -> PlaceAdditionInfo {
        PlaceAdditionInfo {
            id: PlaceId::new(id).unwrap(),
            name: PlaceName::new(format!("Place {id}")).unwrap(),
            cost: cost.map(|c| PlaceCost::new(c).unwrap()),
            coordinates: coords.map(|(lat, lon)| Coordinates::new(lat, lon).unwrap()),
        }
    }

    fn positions(draft: &RouteDraft) -> Vec<usize> {
        draft.entries().iter().map(|p| p.position.get()).collect()
    }

    fn ids(draft: &RouteDraft) -> Vec<&str> {
        draft.entries().iter().map(|p| p.place_id.as_str()).collect()
    }

    #[test]
    fn first_place_gets_position_zero() {
        let mut draft = RouteDraft::new();
        let entry = draft.add_place(info("a", None, None)).unwrap();
        assert_eq!(entry.position, Position::new(0));
    }

    #[test]
    fn appends_after_max_position() {
        let mut draft = RouteDraft::new();
        draft.add_place(info("a", None, None)).unwrap();
        draft.add_place(info("b", None, None)).unwrap();
        let entry = draft.add_place(info("c", None, None)).unwrap();
        assert_eq!(entry.position, Position::new(2));
        assert!(draft.is_excluded(&PlaceId::new("c").unwrap()));
    }

    #[test]
    fn rejects_duplicate_places() {
        let mut draft = RouteDraft::new();
        draft.add_place(info("a", None, None)).unwrap();
        let err = draft.add_place(info("a", None, None)).unwrap_err();
        assert_eq!(err, RouteDraftError::DuplicatePlace(PlaceId::new("a").unwrap()));
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn removal_compacts_positions_and_keeps_order() {
        let mut draft = RouteDraft::new();
        for id in ["a", "b", "c", "d"] {
            draft.add_place(info(id, None, None)).unwrap();
        }

        let removed = draft.remove_place(&PlaceId::new("b").unwrap()).unwrap();
        assert_eq!(removed.position, Position::new(1));
        assert_eq!(positions(&draft), vec![0, 1, 2]);
        assert_eq!(ids(&draft), vec!["a", "c", "d"]);
        assert!(!draft.is_excluded(&PlaceId::new("b").unwrap()));
    }

    #[test]
    fn removing_unknown_place_is_a_no_op() {
        let mut draft = RouteDraft::new();
        draft.add_place(info("a", None, None)).unwrap();
        assert!(draft.remove_place(&PlaceId::new("zzz").unwrap()).is_none());
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn moving_a_place_renumbers() {
        let mut draft = RouteDraft::new();
        for id in ["a", "b", "c"] {
            draft.add_place(info(id, None, None)).unwrap();
        }
        draft
            .move_place(&PlaceId::new("c").unwrap(), Position::new(0))
            .unwrap();
        assert_eq!(ids(&draft), vec!["c", "a", "b"]);
        assert_eq!(positions(&draft), vec![0, 1, 2]);

        draft
            .move_place(&PlaceId::new("c").unwrap(), Position::new(99))
            .unwrap();
        assert_eq!(ids(&draft), vec!["a", "b", "c"]);
    }

    #[test]
    fn total_cost_treats_missing_cost_as_zero() {
        let mut draft = RouteDraft::new();
        draft.add_place(info("a", Some(100.0), None)).unwrap();
        draft.add_place(info("b", None, None)).unwrap();
        draft.add_place(info("c", Some(250.0), None)).unwrap();
        assert_eq!(draft.total_cost(), 350.0);
    }

    #[test]
    fn path_length_skips_places_without_coordinates() {
        let mut draft = RouteDraft::new();
        draft
            .add_place(info("a", None, Some((56.8526, 53.2095))))
            .unwrap();
        draft.add_place(info("b", Some(10.0), None)).unwrap();
        draft
            .add_place(info("c", None, Some((56.8666, 53.2333))))
            .unwrap();

        let a = Coordinates::new(56.8526, 53.2095).unwrap();
        let c = Coordinates::new(56.8666, 53.2333).unwrap();
        assert!((draft.total_path_length_km() - a.haversine_km(&c)).abs() < 1e-9);
        assert_eq!(draft.mappable_entries().count(), 2);
    }

    #[test]
    fn path_length_is_zero_with_single_point() {
        let mut draft = RouteDraft::new();
        draft.add_place(info("a", None, Some((1.0, 1.0)))).unwrap();
        draft.add_place(info("b", None, None)).unwrap();
        assert_eq!(draft.total_path_length_km(), 0.0);
    }

    #[test]
    fn hydration_sorts_and_compacts() {
        let entry = |id: &str, pos: usize| RoutePlaceEntry {
            place_id: PlaceId::new(id).unwrap(),
            position: Position::new(pos),
            name: None,
            cost: None,
            coordinates: None,
        };
        let route = UserRoute {
            id: RouteId::new("r1").unwrap(),
            name: "Walk".into(),
            places: vec![entry("c", 7), entry("a", 2), entry("b", 5), entry("a", 9)],
        };

        let draft = RouteDraft::from_route(route);
        assert_eq!(ids(&draft), vec!["a", "b", "c"]);
        assert_eq!(positions(&draft), vec![0, 1, 2]);
        assert!(["a", "b", "c"]
            .iter()
            .all(|id| draft.is_excluded(&PlaceId::new(*id).unwrap())));
    }

    #[test]
    fn submission_requires_a_name() {
        let mut draft = RouteDraft::new();
        draft.add_place(info("a", None, None)).unwrap();
        draft.rename("   ");
        assert_eq!(
            draft.submission().unwrap_err(),
            TypeConstraintError::EmptyString("route name")
        );

        draft.rename("Evening walk");
        let submission = draft.submission().unwrap();
        assert_eq!(submission.name, "Evening walk");
        assert_eq!(submission.places.len(), 1);
        assert_eq!(submission.places[0].position, Position::new(0));
    }
}
