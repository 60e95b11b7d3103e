//! Error conversion glue between layers.
//!
//! Lower layers know nothing about the service error type; the mappings live
//! here so that `?` works across layer boundaries.

use crate::api::ApiError;
use crate::credentials::CredentialError;
use crate::domain::route::RouteDraftError;
use crate::domain::types::TypeConstraintError;
use crate::forms::auth::{LoginFormError, RegisterFormError};
use crate::forms::filter::FilterFormError;
use crate::services::ServiceError;
use crate::services::route_editor::EditorError;
use crate::session::SessionError;

impl From<CredentialError> for SessionError {
    fn from(val: CredentialError) -> Self {
        SessionError::Storage(val.to_string())
    }
}

impl From<ApiError> for ServiceError {
    fn from(val: ApiError) -> Self {
        match val {
            ApiError::AuthenticationExpired => ServiceError::Unauthenticated,
            ApiError::AuthorizationDenied => ServiceError::Forbidden,
            ApiError::NotFound => ServiceError::NotFound,
            other => ServiceError::Upstream(other.to_string()),
        }
    }
}

impl From<SessionError> for ServiceError {
    fn from(val: SessionError) -> Self {
        match val {
            SessionError::MissingCredential | SessionError::RefreshFailed(_) => {
                ServiceError::Unauthenticated
            }
            SessionError::Storage(message) => ServiceError::Storage(message),
            SessionError::Cancelled => ServiceError::Cancelled,
            SessionError::Api(e) => e.into(),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<RouteDraftError> for ServiceError {
    fn from(val: RouteDraftError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<EditorError> for ServiceError {
    fn from(val: EditorError) -> Self {
        match val {
            EditorError::Closed => ServiceError::Cancelled,
            other => ServiceError::Form(other.to_string()),
        }
    }
}

impl From<LoginFormError> for ServiceError {
    fn from(val: LoginFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<RegisterFormError> for ServiceError {
    fn from(val: RegisterFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<FilterFormError> for ServiceError {
    fn from(val: FilterFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
