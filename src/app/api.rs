//! Client-side access to the content backend.
//!
//! In the browser requests go to same-origin relative paths, which the server
//! forwards to the backend. During server-side rendering they go straight to
//! the configured backend origin.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{FetchError, FetchResult};

pub const LIVE_PATH: &str = "/content/live";
pub const AWAITING_MODERATION_PATH: &str = "/content/awaiting_moderation";
pub const LAST_PATH: &str = "/content/last";
pub const SLIDESHOW_CONTENT_PATH: &str = "/api/slideshow/content";
pub const STARTUP_PATH: &str = "/api/startup";
pub const UI_SETTINGS_PATH: &str = "/ui/settings";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// GET `path` and return the body as text
pub async fn fetch_text(path: &str) -> FetchResult<String> {
    request(Method::Get, path).await
}

/// GET `path` and decode the JSON body
pub async fn fetch_json<T: DeserializeOwned>(path: &str) -> FetchResult<T> {
    let body = request(Method::Get, path).await?;
    Ok(serde_json::from_str(&body)?)
}

/// POST to `path` without a body, ignoring whatever comes back
pub async fn post_no_response(path: &str) -> FetchResult<()> {
    request(Method::Post, path).await.map(|_| ())
}

#[cfg(target_arch = "wasm32")]
async fn request(method: Method, path: &str) -> FetchResult<String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    fn js_err(value: wasm_bindgen::JsValue) -> FetchError {
        FetchError::Network(format!("{:?}", value))
    }

    debug!(method = method.as_str(), path, "fetch");

    let opts = web_sys::RequestInit::new();
    opts.set_method(method.as_str());
    let request = web_sys::Request::new_with_str_and_init(path, &opts).map_err(js_err)?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(js_err)?;

    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let response: web_sys::Response = response.dyn_into().map_err(js_err)?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| FetchError::Decode("response body is not text".into()))
}

#[cfg(all(not(target_arch = "wasm32"), feature = "server"))]
static BACKEND: std::sync::OnceLock<(reqwest::Client, url::Url)> = std::sync::OnceLock::new();

/// Point server-side rendering at the backend. Only the first call wins.
#[cfg(all(not(target_arch = "wasm32"), feature = "server"))]
pub fn set_backend_origin(client: reqwest::Client, origin: url::Url) {
    if BACKEND.set((client, origin)).is_err() {
        tracing::warn!("backend origin already configured, ignoring");
    }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "server"))]
async fn request(method: Method, path: &str) -> FetchResult<String> {
    let (client, origin) = BACKEND.get().ok_or(FetchError::NoOrigin)?;
    let url = origin
        .join(path.trim_start_matches('/'))
        .map_err(|e| FetchError::Network(e.to_string()))?;

    debug!(method = method.as_str(), %url, "fetch");

    let builder = match method {
        Method::Get => client.get(url),
        Method::Post => client.post(url),
    };
    let response = builder
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }
    Ok(response.text().await?)
}

#[cfg(all(not(target_arch = "wasm32"), not(feature = "server")))]
async fn request(method: Method, path: &str) -> FetchResult<String> {
    debug!(method = method.as_str(), path, "no transport available");
    Err(FetchError::NoOrigin)
}
