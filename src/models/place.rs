use serde::{Deserialize, Serialize};

use crate::domain::filter::FilterCriteria;
use crate::domain::geo::Coordinates;
use crate::domain::place::{Category as DomainCategory, District as DomainDistrict, Place};
use crate::domain::types::{
    CategoryName, DistrictName, PhotoRef, PlaceCost, PlaceName, TypeConstraintError,
};

/// Wire form of a catalog place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub photos_url: Option<Vec<Option<String>>>,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category_name: Option<String>,
    pub district_name: Option<String>,
}

/// Wire form of a category or district option.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NamedItemDto {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Body of the place catalog query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterDto {
    pub category_ids: Vec<String>,
    pub district_ids: Vec<String>,
    pub const_min: Option<f64>,
    pub const_max: Option<f64>,
}

/// Coordinates for mapping, or `None` when the wire pair is incomplete or out
/// of range. The place itself stays usable either way.
pub(crate) fn mappable_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Option<Coordinates> {
    Coordinates::from_pair(latitude, longitude).unwrap_or_else(|e| {
        log::warn!("Ignoring coordinates ({latitude:?}, {longitude:?}): {e}");
        None
    })
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<PlaceDto> for Place {
    type Error = TypeConstraintError;

    fn try_from(dto: PlaceDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.unwrap_or_default().try_into()?,
            name: PlaceName::new(dto.name.unwrap_or_default())?,
            photos: dto
                .photos_url
                .unwrap_or_default()
                .into_iter()
                .filter_map(|photo| PhotoRef::new(photo.unwrap_or_default()).ok())
                .collect(),
            description: optional_text(dto.description),
            cost: dto.cost.map(PlaceCost::new).transpose()?,
            coordinates: mappable_coordinates(dto.latitude, dto.longitude),
            category: optional_text(dto.category_name)
                .map(CategoryName::new)
                .transpose()?,
            district: optional_text(dto.district_name)
                .map(DistrictName::new)
                .transpose()?,
        })
    }
}

impl TryFrom<NamedItemDto> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(dto: NamedItemDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.unwrap_or_default().try_into()?,
            name: CategoryName::new(dto.name.unwrap_or_default())?,
        })
    }
}

impl TryFrom<NamedItemDto> for DomainDistrict {
    type Error = TypeConstraintError;

    fn try_from(dto: NamedItemDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id.unwrap_or_default().try_into()?,
            name: DistrictName::new(dto.name.unwrap_or_default())?,
        })
    }
}

impl From<&FilterCriteria> for FilterDto {
    fn from(filter: &FilterCriteria) -> Self {
        Self {
            category_ids: filter
                .category_ids
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            district_ids: filter
                .district_ids
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            const_min: filter.min_cost.map(PlaceCost::get),
            const_max: filter.max_cost.map(PlaceCost::get),
        }
    }
}
