use thiserror::Error;

use crate::domain::navigation::AppRoute;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No usable credential: none stored, refresh failed, or the server kept
    /// rejecting the token after a refresh.
    #[error("authentication required")]
    Unauthenticated,
    /// Login was rejected.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The user is authenticated but not allowed to perform the operation.
    #[error("access denied")]
    Forbidden,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// User input failed validation.
    #[error("invalid input: {0}")]
    Form(String),
    #[error("invalid value: {0}")]
    TypeConstraint(String),
    #[error("operation cancelled")]
    Cancelled,
    /// Transport failure, unexpected status or unreadable response.
    #[error("server error: {0}")]
    Upstream(String),
    #[error("credential storage failed: {0}")]
    Storage(String),
}

impl ServiceError {
    /// Where the user should be sent after this error, if anywhere.
    pub fn redirect(&self) -> Option<AppRoute> {
        match self {
            ServiceError::Unauthenticated => Some(AppRoute::Login),
            _ => None,
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
