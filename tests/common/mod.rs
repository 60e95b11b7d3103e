//! Helpers for integration tests.
//!
//! [`MockServer`] is a small axum application that behaves like the REST API:
//! login issues a bearer token and a refresh cookie, refresh requires the
//! cookie and rotates the token, and protected endpoints answer 401 for any
//! token other than the current one.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use tourist_routes::api::http::HttpApi;
use tourist_routes::credentials::FileCredentialStore;
use tourist_routes::models::config::ClientConfig;
use tourist_routes::session::Session;

pub const PASSWORD: &str = "secret";
const REFRESH_COOKIE: &str = "refreshToken=refresh-1";

#[derive(Default)]
pub struct MockState {
    current_token: Mutex<String>,
    issued: AtomicUsize,
    refresh_calls: AtomicUsize,
    route_list_calls: AtomicUsize,
    saved_routes: Mutex<Vec<Value>>,
}

impl MockState {
    fn issue(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let token = format!("token-{n}");
        *self.current_token.lock().unwrap() = token.clone();
        token
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.current_token.lock().unwrap());
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected)
    }
}

pub struct MockServer {
    pub base_url: String,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/v1/auth/login", post(login))
            .route("/v1/auth/refresh", post(refresh))
            .route("/v1/places", post(list_places))
            .route("/v1/routes/simple-info", get(list_routes))
            .route("/v1/routes/full-info/{id}", get(get_route))
            .route("/v1/routes", post(create_route))
            .route("/v1/routes/{id}", put(update_route))
            .route("/v1/users", get(list_users))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    /// Invalidates every token handed out so far.
    pub fn expire_tokens(&self) {
        *self.state.current_token.lock().unwrap() = "expired".to_string();
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn route_list_calls(&self) -> usize {
        self.state.route_list_calls.load(Ordering::SeqCst)
    }

    pub fn saved_routes(&self) -> Vec<Value> {
        self.state.saved_routes.lock().unwrap().clone()
    }

    pub fn config(&self, dir: &TempDir) -> ClientConfig {
        ClientConfig {
            api_base_url: self.base_url.clone(),
            token_path: dir.path().join("token"),
            request_timeout_secs: 5,
        }
    }

    /// Fresh client (empty cookie jar) and a session persisted under `dir`.
    pub fn client(&self, dir: &TempDir) -> (HttpApi, Session) {
        let config = self.config(dir);
        let api = HttpApi::new(&config).unwrap();
        let store = FileCredentialStore::new(config.token_path);
        let session = Session::new(Arc::new(store)).unwrap();
        (api, session)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let token = state.issue();
    (
        [(header::SET_COOKIE, format!("{REFRESH_COOKIE}; Path=/; HttpOnly"))],
        Json(json!({ "token": token })),
    )
        .into_response()
}

async fn refresh(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let has_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|c| c.trim() == REFRESH_COOKIE));
    if !has_cookie {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({ "token": state.issue() })).into_response()
}

async fn list_places(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        {
            "id": "p1",
            "name": "Cathedral",
            "photosUrl": ["cathedral.jpg", null],
            "description": "Old cathedral",
            "cost": 100.0,
            "latitude": 55.75,
            "longitude": 37.61,
            "categoryName": "Churches",
            "districtName": "Center"
        },
        {
            "id": "p2",
            "name": "Embankment",
            "photosUrl": null,
            "description": null,
            "cost": null,
            "latitude": 55.74,
            "longitude": null,
            "categoryName": null,
            "districtName": null
        }
    ]))
    .into_response()
}

async fn list_routes(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.route_list_calls.fetch_add(1, Ordering::SeqCst);
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        { "id": "r1", "name": "Old town" },
        { "id": "r2", "name": "Parks" }
    ]))
    .into_response()
}

async fn get_route(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id != "r1" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "id": "r1",
        "name": "Old town",
        "routePlaces": [
            { "placeId": "p2", "placePosition": 3, "placeName": "Embankment" },
            {
                "placeId": "p1",
                "placePosition": 0,
                "placeName": "Cathedral",
                "cost": 100.0,
                "latitude": 55.75,
                "longitude": 37.61
            }
        ]
    }))
    .into_response()
}

async fn create_route(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let name = body["name"].clone();
    state.saved_routes.lock().unwrap().push(body);
    Json(json!({ "id": "r-new", "name": name })).into_response()
}

async fn update_route(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.saved_routes.lock().unwrap().push(body);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_users(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    StatusCode::FORBIDDEN.into_response()
}
