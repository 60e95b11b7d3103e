use serde::{Deserialize, Serialize};

use crate::domain::types::{Latitude, Longitude, TypeConstraintError};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair. Places either carry both or neither.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: Latitude,
    pub longitude: Longitude,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            latitude: Latitude::new(latitude)?,
            longitude: Longitude::new(longitude)?,
        })
    }

    /// Builds coordinates from an optional wire pair.
    ///
    /// Returns `Ok(None)` unless both halves are present.
    pub fn from_pair(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, TypeConstraintError> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Self::new(latitude, longitude).map(Some),
            _ => Ok(None),
        }
    }

    /// Great-circle distance to `other` in kilometres (haversine formula).
    pub fn haversine_km(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.get().to_radians();
        let lat2 = other.latitude.get().to_radians();
        let d_lat = (other.latitude.get() - self.latitude.get()).to_radians();
        let d_lon = (other.longitude.get() - self.longitude.get()).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Total length of a path visiting `points` in order.
pub fn path_length_km<'a, I>(points: I) -> f64
where
    I: IntoIterator<Item = &'a Coordinates>,
{
    let mut total = 0.0;
    let mut previous: Option<&Coordinates> = None;
    for point in points {
        if let Some(prev) = previous {
            total += prev.haversine_km(point);
        }
        previous = Some(point);
    }
    total
}
