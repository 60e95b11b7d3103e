use crate::api::{ApiError, AuthApi};
use crate::domain::auth::UserInfo;
use crate::domain::navigation::AppRoute;
use crate::forms::auth::{LoginPayload, RegisterPayload};
use crate::session::Session;

use super::{ServiceError, ServiceResult};

fn is_rejection(error: &ApiError) -> bool {
    match error {
        ApiError::AuthenticationExpired | ApiError::AuthorizationDenied | ApiError::NotFound => {
            true
        }
        ApiError::Status { status, .. } => (400..500).contains(status),
        _ => false,
    }
}

/// Exchanges credentials for a bearer token and stores it in the session.
///
/// On success the user should land on the dashboard.
pub async fn login<A>(payload: LoginPayload, session: &Session, api: &A) -> ServiceResult<AppRoute>
where
    A: AuthApi + ?Sized,
{
    let token = match api.login(&payload).await {
        Ok(token) => token,
        Err(e) if is_rejection(&e) => {
            log::warn!("Login rejected for {}: {e}", payload.email.as_str());
            return Err(ServiceError::InvalidCredentials);
        }
        Err(e) => {
            log::error!("Failed to log in: {e}");
            return Err(e.into());
        }
    };

    session.set_token(&token).map_err(|e| {
        log::error!("Failed to store token: {e}");
        ServiceError::from(e)
    })?;
    Ok(AppRoute::Dashboard)
}

/// Creates an account. The user is sent to the login page afterwards.
pub async fn register<A>(payload: RegisterPayload, api: &A) -> ServiceResult<AppRoute>
where
    A: AuthApi + ?Sized,
{
    match api.register(&payload).await {
        Ok(()) => Ok(AppRoute::Login),
        Err(e) => {
            log::error!("Failed to register {}: {e}", payload.email.as_str());
            Err(e.into())
        }
    }
}

pub fn logout(session: &Session) -> ServiceResult<AppRoute> {
    session.clear_token().map_err(|e| {
        log::error!("Failed to clear token: {e}");
        ServiceError::from(e)
    })?;
    Ok(AppRoute::Login)
}

/// Identity claims of the logged-in user, read from the stored token.
pub fn current_user(session: &Session) -> ServiceResult<UserInfo> {
    let token = session.token()?;
    UserInfo::from_token(&token).map_err(|e| {
        log::error!("Failed to decode token claims: {e}");
        ServiceError::from(e)
    })
}
