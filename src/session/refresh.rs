use crate::api::AuthApi;
use crate::domain::types::BearerToken;
use crate::session::{Session, SessionError, SessionResult};

/// Obtains a new bearer token through the refresh endpoint and stores it.
///
/// The request relies on the session cookie kept by the HTTP client. Every
/// failure, including a failure to persist the new token, is reported as
/// [`SessionError::RefreshFailed`]. The refresh is never retried.
pub async fn refresh<A>(session: &Session, auth: &A) -> SessionResult<BearerToken>
where
    A: AuthApi + ?Sized,
{
    let token = auth.refresh().await.map_err(|e| {
        log::warn!("Failed to refresh token: {e}");
        SessionError::RefreshFailed(e.to_string())
    })?;

    session.set_token(&token).map_err(|e| {
        log::error!("Failed to store refreshed token: {e}");
        SessionError::RefreshFailed(e.to_string())
    })?;

    Ok(token)
}
