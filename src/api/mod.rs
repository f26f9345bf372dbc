//! HTTP API handlers
//!
//! The content backend does all real work. This server forwards its endpoints
//! so the browser can call them same-origin, and adds the front end's own
//! settings and health endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::moderation::UiSettings;

/// Response headers passed back from the backend
const FORWARDED_HEADERS: [header::HeaderName; 2] = [header::CONTENT_TYPE, header::CACHE_CONTROL];

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub backend: Arc<Url>,
    pub settings: UiSettings,
    pub started: Instant,
}

impl AppState {
    pub fn new(client: reqwest::Client, backend: Url, settings: UiSettings) -> Self {
        Self {
            client,
            backend: Arc::new(backend),
            settings,
            started: Instant::now(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("invalid backend path: {0}")]
    InvalidPath(#[from] url::ParseError),

    #[error("backend timed out")]
    Timeout,

    #[error("backend unreachable: {0}")]
    Unreachable(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Unreachable(e.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            ProxyError::InvalidPath { .. } => StatusCode::BAD_REQUEST,
            ProxyError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Unreachable { .. } => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}

/// Routes served next to the Dioxus app
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/ui/settings", get(ui_settings_handler))
        .route("/content/{*path}", any(forward_handler))
        .route("/api/{*path}", any(forward_handler))
        .with_state(state)
}

/// General status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET /status - Service health check
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "content-showcase",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

/// GET /ui/settings - Front-end behaviour switches
pub async fn ui_settings_handler(State(state): State<AppState>) -> Json<UiSettings> {
    Json(state.settings.clone())
}

/// Backend URL for an incoming request, keeping path and query
pub fn backend_url(backend: &Url, uri: &Uri) -> Result<Url, ProxyError> {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    Ok(backend.join(path_and_query.trim_start_matches('/'))?)
}

/// ANY /content/*, /api/* - Forward to the content backend
pub async fn forward_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = backend_url(&state.backend, &uri)?;
    debug!(%method, %url, "forwarding");

    let mut request = state.client.request(method.clone(), url.clone());
    for name in [header::ACCEPT, header::CONTENT_TYPE, header::COOKIE] {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value);
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = request.send().await.map_err(|e| {
        warn!(%method, %url, "backend request failed: {}", e);
        ProxyError::from(e)
    })?;

    let status = upstream.status();
    let mut response_headers = HeaderMap::new();
    for name in FORWARDED_HEADERS {
        if let Some(value) = upstream.headers().get(&name) {
            if let Ok(value) = HeaderValue::from_bytes(value.as_bytes()) {
                response_headers.insert(name, value);
            }
        }
    }
    let bytes = upstream.bytes().await?;

    if !status.is_success() {
        debug!(%method, %url, %status, "backend returned non-success");
    }

    Ok((status, response_headers, bytes).into_response())
}
