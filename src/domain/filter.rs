use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, DistrictId, PlaceCost};

/// Criteria for querying the place catalog.
///
/// Empty sets mean "any". `min_cost <= max_cost` is not enforced here; the
/// server decides what an inverted range means.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    pub min_cost: Option<PlaceCost>,
    pub max_cost: Option<PlaceCost>,
    pub category_ids: BTreeSet<CategoryId>,
    pub district_ids: BTreeSet<DistrictId>,
}

impl FilterCriteria {
    pub fn min_cost(mut self, cost: PlaceCost) -> Self {
        self.min_cost = Some(cost);
        self
    }

    pub fn max_cost(mut self, cost: PlaceCost) -> Self {
        self.max_cost = Some(cost);
        self
    }

    pub fn category(mut self, id: CategoryId) -> Self {
        self.category_ids.insert(id);
        self
    }

    pub fn district(mut self, id: DistrictId) -> Self {
        self.district_ids.insert(id);
        self
    }

    /// Adds the category if absent, removes it otherwise.
    pub fn toggle_category(&mut self, id: CategoryId) {
        if !self.category_ids.remove(&id) {
            self.category_ids.insert(id);
        }
    }

    /// Adds the district if absent, removes it otherwise.
    pub fn toggle_district(&mut self, id: DistrictId) {
        if !self.district_ids.remove(&id) {
            self.district_ids.insert(id);
        }
    }

    /// True when no criterion narrows the catalog.
    pub fn is_empty(&self) -> bool {
        self.min_cost.is_none()
            && self.max_cost.is_none()
            && self.category_ids.is_empty()
            && self.district_ids.is_empty()
    }
}
