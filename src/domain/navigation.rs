use std::fmt::{Display, Formatter};

use crate::domain::types::{PlaceId, RouteId};

/// Locations a front end can navigate to after a service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Login,
    Register,
    Dashboard,
    CreateRoute,
    EditRoute(RouteId),
    Places,
    PlaceDetail(PlaceId),
}

impl AppRoute {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::CreateRoute => "/create-route".to_string(),
            Self::EditRoute(id) => format!("/routes/{id}"),
            Self::Places => "/places".to_string(),
            Self::PlaceDetail(id) => format!("/places/{id}"),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
