use crate::api::{AuthApi, UserReader};
use crate::domain::auth::User;
use crate::session::{Session, SessionExecutor};

use super::{ServiceResult, failed};

/// Administrative listing of all accounts. Non-admins get
/// [`ServiceError::Forbidden`](super::ServiceError::Forbidden).
pub async fn list_users<A>(session: &Session, api: &A) -> ServiceResult<Vec<User>>
where
    A: AuthApi + UserReader + ?Sized,
{
    SessionExecutor::new(session, api)
        .run(|token| async move { api.list_users(&token).await })
        .await
        .map_err(|e| failed("list users", e))
}
