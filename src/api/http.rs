use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::api::{
    ApiError, ApiResult, AuthApi, CatalogReader, PlaceReader, RouteReader, RouteWriter,
    UserReader,
};
use crate::domain::auth::User;
use crate::domain::filter::FilterCriteria;
use crate::domain::place::{Category, District, Place};
use crate::domain::route::{RouteSubmission, RouteSummary, UserRoute};
use crate::domain::types::{BearerToken, PlaceId, RouteId, TypeConstraintError};
use crate::forms::auth::{LoginPayload, RegisterPayload};
use crate::models::auth::{LoginDto, RegisterDto, TokenDto, UserDto};
use crate::models::config::ClientConfig;
use crate::models::place::{FilterDto, NamedItemDto, PlaceDto};
use crate::models::route::{UserRouteDto, UserRouteDtoReq, UserRouteSimpleDto};

/// [`reqwest`]-backed implementation of every API trait.
///
/// The client keeps a cookie jar so the refresh endpoint receives the session
/// cookie issued at login. `reqwest::Client` is cheap to clone.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| ApiError::Transport(format!("invalid base url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Transport(format!(
                "invalid base url: {}",
                config.api_base_url
            )));
        }
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        log::debug!("{method} {url}");
        self.client.request(method, url)
    }

    fn authorized(&self, method: Method, segments: &[&str], token: &BearerToken) -> RequestBuilder {
        self.request(method, segments)
            .header(AUTHORIZATION, token.authorization_header())
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        log::debug!("API responded with {status}: {message}");
        Err(ApiError::from_status(status.as_u16(), message))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn decode<D, T>(dto: D) -> ApiResult<T>
where
    T: TryFrom<D, Error = TypeConstraintError>,
{
    T::try_from(dto).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decodes a listing item by item. Records that fail validation are logged
/// and left out so one bad row does not hide the rest.
fn decode_all<D, T>(items: Vec<D>) -> ApiResult<Vec<T>>
where
    T: TryFrom<D, Error = TypeConstraintError>,
{
    Ok(items
        .into_iter()
        .filter_map(|item| match T::try_from(item) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Skipping invalid {}: {e}", std::any::type_name::<T>());
                None
            }
        })
        .collect())
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, payload: &LoginPayload) -> ApiResult<BearerToken> {
        let request = self
            .request(Method::POST, &["v1", "auth", "login"])
            .json(&LoginDto::from(payload));
        decode(self.json::<TokenDto>(request).await?)
    }

    async fn register(&self, payload: &RegisterPayload) -> ApiResult<()> {
        let request = self
            .request(Method::POST, &["v1", "auth", "register"])
            .json(&RegisterDto::from(payload));
        self.send(request).await.map(|_| ())
    }

    async fn refresh(&self) -> ApiResult<BearerToken> {
        let request = self.request(Method::POST, &["v1", "auth", "refresh"]);
        decode(self.json::<TokenDto>(request).await?)
    }
}

#[async_trait]
impl PlaceReader for HttpApi {
    async fn list_places(
        &self,
        token: &BearerToken,
        filter: Option<&FilterCriteria>,
    ) -> ApiResult<Vec<Place>> {
        let mut request = self.authorized(Method::POST, &["v1", "places"], token);
        if let Some(filter) = filter {
            request = request.json(&FilterDto::from(filter));
        }
        decode_all(self.json::<Option<Vec<PlaceDto>>>(request).await?.unwrap_or_default())
    }

    async fn get_place(&self, token: &BearerToken, id: &PlaceId) -> ApiResult<Place> {
        let request = self.authorized(Method::GET, &["v1", "places", id.as_str()], token);
        decode(self.json::<PlaceDto>(request).await?)
    }
}

#[async_trait]
impl CatalogReader for HttpApi {
    async fn list_categories(&self, token: &BearerToken) -> ApiResult<Vec<Category>> {
        let request = self.authorized(Method::GET, &["v1", "categories"], token);
        decode_all(self.json::<Vec<NamedItemDto>>(request).await?)
    }

    async fn list_districts(&self, token: &BearerToken) -> ApiResult<Vec<District>> {
        let request = self.authorized(Method::GET, &["v1", "districts"], token);
        decode_all(self.json::<Vec<NamedItemDto>>(request).await?)
    }
}

#[async_trait]
impl RouteReader for HttpApi {
    async fn list_routes(&self, token: &BearerToken) -> ApiResult<Vec<RouteSummary>> {
        let request = self.authorized(Method::GET, &["v1", "routes", "simple-info"], token);
        decode_all(
            self.json::<Option<Vec<UserRouteSimpleDto>>>(request)
                .await?
                .unwrap_or_default(),
        )
    }

    async fn get_route(&self, token: &BearerToken, id: &RouteId) -> ApiResult<UserRoute> {
        let request = self.authorized(
            Method::GET,
            &["v1", "routes", "full-info", id.as_str()],
            token,
        );
        decode(self.json::<UserRouteDto>(request).await?)
    }
}

#[async_trait]
impl RouteWriter for HttpApi {
    async fn create_route(
        &self,
        token: &BearerToken,
        route: &RouteSubmission,
    ) -> ApiResult<RouteSummary> {
        let request = self
            .authorized(Method::POST, &["v1", "routes"], token)
            .json(&UserRouteDtoReq::from(route));
        decode(self.json::<UserRouteSimpleDto>(request).await?)
    }

    async fn update_route(
        &self,
        token: &BearerToken,
        id: &RouteId,
        route: &RouteSubmission,
    ) -> ApiResult<()> {
        let request = self
            .authorized(Method::PUT, &["v1", "routes", id.as_str()], token)
            .json(&UserRouteDtoReq::from(route));
        self.send(request).await.map(|_| ())
    }

    async fn delete_route(&self, token: &BearerToken, id: &RouteId) -> ApiResult<()> {
        let request = self.authorized(Method::DELETE, &["v1", "routes", id.as_str()], token);
        self.send(request).await.map(|_| ())
    }
}

#[async_trait]
impl UserReader for HttpApi {
    async fn list_users(&self, token: &BearerToken) -> ApiResult<Vec<User>> {
        let request = self.authorized(Method::GET, &["v1", "users"], token);
        decode_all(self.json::<Vec<UserDto>>(request).await?)
    }
}
