use crate::api::{AuthApi, RouteReader, RouteWriter};
use crate::domain::route::RouteSummary;
use crate::domain::types::RouteId;
use crate::session::{Session, SessionExecutor};

use super::{ServiceResult, failed};

/// Routes of the logged-in user, as shown on the dashboard.
pub async fn list_routes<A>(session: &Session, api: &A) -> ServiceResult<Vec<RouteSummary>>
where
    A: AuthApi + RouteReader + ?Sized,
{
    SessionExecutor::new(session, api)
        .run(|token| async move { api.list_routes(&token).await })
        .await
        .map_err(|e| failed("list routes", e))
}

pub async fn delete_route<A>(id: &RouteId, session: &Session, api: &A) -> ServiceResult<()>
where
    A: AuthApi + RouteWriter + ?Sized,
{
    SessionExecutor::new(session, api)
        .run(|token| async move { api.delete_route(&token, id).await })
        .await
        .map_err(|e| failed(&format!("delete route {id}"), e))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::test::TestApi;
    use crate::credentials::MemoryCredentialStore;
    use crate::domain::route::UserRoute;
    use crate::domain::types::BearerToken;
    use crate::services::ServiceError;

    fn session(token: &str) -> Session {
        let store = MemoryCredentialStore::with_token(BearerToken::new(token).unwrap());
        Session::new(Arc::new(store)).unwrap()
    }

    fn sample_route(id: &str) -> UserRoute {
        UserRoute {
            id: RouteId::new(id).unwrap(),
            name: format!("Route {id}"),
            places: vec![],
        }
    }

    #[tokio::test]
    async fn dashboard_recovers_from_expired_token() {
        let session = session("expired");
        let api = TestApi::new()
            .refreshing_to("fresh")
            .with_routes(vec![sample_route("r1"), sample_route("r2")]);

        let routes = list_routes(&session, &api).await.unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(api.calls("refresh"), 1);
        assert_eq!(api.calls("list_routes"), 2);
    }

    #[tokio::test]
    async fn delete_removes_route() {
        let api = TestApi::new()
            .accepting("good")
            .with_routes(vec![sample_route("r1")]);

        delete_route(&RouteId::new("r1").unwrap(), &session("good"), &api)
            .await
            .unwrap();

        assert!(api.stored_routes().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_route_is_not_found() {
        let api = TestApi::new().accepting("good");
        let result = delete_route(&RouteId::new("r9").unwrap(), &session("good"), &api).await;
        assert_eq!(result, Err(ServiceError::NotFound));
    }
}
