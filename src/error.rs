//! Error types shared by the WASM client and the server.

use thiserror::Error;

/// Failure fetching from the content backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("no backend origin configured")]
    NoOrigin,

    #[error("image failed to load: {0}")]
    Preload(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else if e.is_timeout() {
            Self::Timeout(0)
        } else {
            Self::Network(e.to_string())
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
