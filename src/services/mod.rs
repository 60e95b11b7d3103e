//! One function per user action.
//!
//! Services take the [`Session`](crate::session::Session) and an API
//! implementation, run authenticated calls through the
//! [`SessionExecutor`](crate::session::SessionExecutor) and translate
//! failures into [`ServiceError`].

use crate::api::ApiError;
use crate::session::SessionError;

pub mod auth;
pub mod errors;
pub mod places;
pub mod route_editor;
pub mod routes;
pub mod users;

pub use errors::{ServiceError, ServiceResult};

/// Logs a failed action and converts the error for the caller.
///
/// Expired sessions are expected and only warned about.
pub(crate) fn failed(action: &str, error: SessionError) -> ServiceError {
    match &error {
        SessionError::MissingCredential
        | SessionError::RefreshFailed(_)
        | SessionError::Api(ApiError::AuthenticationExpired) => {
            log::warn!("Failed to {action}: {error}");
        }
        SessionError::Cancelled => log::debug!("Cancelled {action}"),
        _ => log::error!("Failed to {action}: {error}"),
    }
    error.into()
}
