//! Gateway to the REST API.
//!
//! Each resource is exposed through a small trait so that services can be
//! generic over the transport. [`http::HttpApi`] talks to the real server;
//! tests use the in-memory `test::TestApi`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::auth::User;
use crate::domain::filter::FilterCriteria;
use crate::domain::place::{Category, District, Place};
use crate::domain::route::{RouteSubmission, RouteSummary, UserRoute};
use crate::domain::types::{BearerToken, PlaceId, RouteId};
use crate::forms::auth::{LoginPayload, RegisterPayload};

pub mod http;

/// Failure of a single API call, classified by what the caller can do about
/// it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 401: the bearer token is missing, invalid or expired.
    #[error("authentication expired")]
    AuthenticationExpired,
    /// HTTP 403: authenticated but not allowed.
    #[error("access denied")]
    AuthorizationDenied,
    /// HTTP 404.
    #[error("not found")]
    NotFound,
    /// Any other non-success status, including 5xx.
    #[error("server responded with status {status}: {message}")]
    Status { status: u16, message: String },
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body could not be understood.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 => Self::AuthenticationExpired,
            403 => Self::AuthorizationDenied,
            404 => Self::NotFound,
            _ => Self::Status {
                status,
                message: message.into(),
            },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Endpoints that do not take a bearer token.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn login(&self, payload: &LoginPayload) -> ApiResult<BearerToken>;
    /// Create a new account.
    async fn register(&self, payload: &RegisterPayload) -> ApiResult<()>;
    /// Obtain a fresh bearer token using the ambient session cookie.
    async fn refresh(&self) -> ApiResult<BearerToken>;
}

/// Read-only operations for the place catalog.
#[async_trait]
pub trait PlaceReader: Send + Sync {
    /// List places, optionally narrowed by a filter.
    async fn list_places(
        &self,
        token: &BearerToken,
        filter: Option<&FilterCriteria>,
    ) -> ApiResult<Vec<Place>>;
    /// Retrieve a single place.
    async fn get_place(&self, token: &BearerToken, id: &PlaceId) -> ApiResult<Place>;
}

/// Read-only operations for filter dictionaries.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn list_categories(&self, token: &BearerToken) -> ApiResult<Vec<Category>>;
    async fn list_districts(&self, token: &BearerToken) -> ApiResult<Vec<District>>;
}

/// Read-only operations for the current user's routes.
#[async_trait]
pub trait RouteReader: Send + Sync {
    /// List routes with id and name only.
    async fn list_routes(&self, token: &BearerToken) -> ApiResult<Vec<RouteSummary>>;
    /// Retrieve a route with all of its places.
    async fn get_route(&self, token: &BearerToken, id: &RouteId) -> ApiResult<UserRoute>;
}

/// Write operations for the current user's routes. Updates replace the whole
/// route.
#[async_trait]
pub trait RouteWriter: Send + Sync {
    async fn create_route(
        &self,
        token: &BearerToken,
        route: &RouteSubmission,
    ) -> ApiResult<RouteSummary>;
    async fn update_route(
        &self,
        token: &BearerToken,
        id: &RouteId,
        route: &RouteSubmission,
    ) -> ApiResult<()>;
    async fn delete_route(&self, token: &BearerToken, id: &RouteId) -> ApiResult<()>;
}

/// Administrative user listing.
#[async_trait]
pub trait UserReader: Send + Sync {
    async fn list_users(&self, token: &BearerToken) -> ApiResult<Vec<User>>;
}
