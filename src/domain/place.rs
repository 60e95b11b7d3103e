use serde::{Deserialize, Serialize};

use crate::domain::geo::Coordinates;
use crate::domain::types::{
    CategoryId, CategoryName, DistrictId, DistrictName, PhotoRef, PlaceCost, PlaceId, PlaceName,
};

/// A place from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: PlaceId,
    pub name: PlaceName,
    pub photos: Vec<PhotoRef>,
    pub description: Option<String>,
    /// `None` means free or not specified.
    pub cost: Option<PlaceCost>,
    pub coordinates: Option<Coordinates>,
    pub category: Option<CategoryName>,
    pub district: Option<DistrictName>,
}

impl Place {
    /// Photo shown on catalog cards.
    pub fn cover_photo(&self) -> Option<&PhotoRef> {
        self.photos.first()
    }
}

/// Place category used by the catalog filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
}

/// City district used by the catalog filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct District {
    pub id: DistrictId,
    pub name: DistrictName,
}
