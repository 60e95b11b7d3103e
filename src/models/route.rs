use serde::{Deserialize, Serialize};

use crate::models::place::mappable_coordinates;
use crate::domain::route::{RoutePlaceEntry, RouteSubmission, RouteSummary, UserRoute};
use crate::domain::types::{PlaceCost, PlaceName, Position, TypeConstraintError};

/// Wire form of a place reference inside a route.
///
/// The display fields are only filled by the full-info endpoint; request
/// bodies leave them out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlaceDto {
    pub place_id: Option<String>,
    pub place_position: Option<i32>,
    pub place_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Route returned by the full-info endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRouteDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub route_places: Option<Vec<RoutePlaceDto>>,
}

/// Route returned by the list and create endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRouteSimpleDto {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Full-replace body for creating or updating a route.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRouteDtoReq {
    pub name: String,
    pub route_places: Vec<RoutePlaceDto>,
}

impl TryFrom<RoutePlaceDto> for RoutePlaceEntry {
    type Error = TypeConstraintError;

    fn try_from(dto: RoutePlaceDto) -> Result<Self, Self::Error> {
        Ok(Self {
            place_id: dto.place_id.unwrap_or_default().try_into()?,
            position: Position::try_from(dto.place_position.unwrap_or(0))?,
            name: dto
                .place_name
                .filter(|n| !n.trim().is_empty())
                .map(PlaceName::new)
                .transpose()?,
            cost: dto.cost.map(PlaceCost::new).transpose()?,
            coordinates: mappable_coordinates(dto.latitude, dto.longitude),
        })
    }
}

impl TryFrom<UserRouteDto> for UserRoute {
    type Error = TypeConstraintError;

    fn try_from(dto: UserRouteDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.unwrap_or_default().try_into()?,
            name: dto.name.unwrap_or_default(),
            places: dto
                .route_places
                .unwrap_or_default()
                .into_iter()
                .filter_map(|place| match RoutePlaceEntry::try_from(place) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::warn!("Skipping route place: {e}");
                        None
                    }
                })
                .collect(),
        })
    }
}

impl TryFrom<UserRouteSimpleDto> for RouteSummary {
    type Error = TypeConstraintError;

    fn try_from(dto: UserRouteSimpleDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.unwrap_or_default().try_into()?,
            name: dto.name.unwrap_or_default(),
        })
    }
}

impl From<&RouteSubmission> for UserRouteDtoReq {
    fn from(submission: &RouteSubmission) -> Self {
        Self {
            name: submission.name.as_str().to_string(),
            route_places: submission
                .places
                .iter()
                .map(|p| RoutePlaceDto {
                    place_id: Some(p.place_id.as_str().to_string()),
                    place_position: Some(i32::try_from(p.position.get()).unwrap_or(i32::MAX)),
                    place_name: p.name.as_ref().map(|n| n.as_str().to_string()),
                    ..RoutePlaceDto::default()
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::Coordinates;
    use crate::domain::route::{PlaceAdditionInfo, RouteDraft};
    use crate::domain::types::PlaceId;

    #[test]
    fn parses_full_route() {
        let dto: UserRouteDto = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "name": "Center",
            "routePlaces": [
                { "placeId": "b", "placePosition": 1, "placeName": "Bridge", "cost": 0.0 },
                { "placeId": "a", "placePosition": 0, "placeName": null,
                  "latitude": 56.8, "longitude": 53.2 }
            ]
        }))
        .unwrap();

        let route = UserRoute::try_from(dto).unwrap();
        assert_eq!(route.places.len(), 2);
        assert_eq!(route.places[1].place_id, "a");
        assert!(route.places[1].name.is_none());
        assert!(route.places[1].coordinates.is_some());
    }

    #[test]
    fn skips_unreadable_route_places() {
        let dto: UserRouteDto = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "name": "Center",
            "routePlaces": [
                { "placeId": "a", "placePosition": 0, "placeName": "Arch" },
                { "placeId": "b", "placePosition": 1, "placeName": "Bridge", "cost": -5.0 },
                { "placeId": "c", "placePosition": 2, "placeName": "Cathedral",
                  "latitude": 95.0, "longitude": 10.0 }
            ]
        }))
        .unwrap();

        let route = UserRoute::try_from(dto).unwrap();
        let ids: Vec<_> = route.places.iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert!(route.places[1].coordinates.is_none());
    }

    #[test]
    fn request_body_strips_display_fields() {
        let mut draft = RouteDraft::new();
        draft.rename("Trip");
        draft
            .add_place(PlaceAdditionInfo {
                id: PlaceId::new("p1").unwrap(),
                name: PlaceName::new("Park").unwrap(),
                cost: Some(PlaceCost::new(100.0).unwrap()),
                coordinates: Some(Coordinates::new(1.0, 2.0).unwrap()),
            })
            .unwrap();

        let body = UserRouteDtoReq::from(&draft.submission().unwrap());
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Trip",
                "routePlaces": [
                    { "placeId": "p1", "placePosition": 0, "placeName": "Park" }
                ]
            })
        );
    }

    #[test]
    fn rejects_negative_positions() {
        let dto = RoutePlaceDto {
            place_id: Some("p".into()),
            place_position: Some(-2),
            ..RoutePlaceDto::default()
        };
        assert!(RoutePlaceEntry::try_from(dto).is_err());
    }
}
