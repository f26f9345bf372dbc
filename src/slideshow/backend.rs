//! HTTP implementation of [`SlideshowBackend`].

use async_trait::async_trait;
use std::time::Duration;

use super::{SlideshowBackend, REQUEST_TIMEOUT};
use crate::app::api::{self, SLIDESHOW_CONTENT_PATH, STARTUP_PATH};
use crate::error::{FetchError, FetchResult};
use crate::model::SlideshowContent;
use crate::timer::{with_timeout, RuntimeTimer, Timer};

/// Fetches slideshow data through the app's HTTP client with a fixed deadline.
pub struct HttpSlideshowBackend<T = RuntimeTimer> {
    timer: T,
    timeout: Duration,
}

impl HttpSlideshowBackend<RuntimeTimer> {
    pub fn new() -> Self {
        Self::with_timer(RuntimeTimer, REQUEST_TIMEOUT)
    }
}

impl Default for HttpSlideshowBackend<RuntimeTimer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Timer> HttpSlideshowBackend<T> {
    pub fn with_timer(timer: T, timeout: Duration) -> Self {
        Self { timer, timeout }
    }
}

#[async_trait(?Send)]
impl<T: Timer> SlideshowBackend for HttpSlideshowBackend<T> {
    async fn fetch_content(&self) -> FetchResult<SlideshowContent> {
        with_timeout(
            &self.timer,
            self.timeout,
            api::fetch_json::<SlideshowContent>(SLIDESHOW_CONTENT_PATH),
        )
        .await
    }

    async fn fetch_startup(&self) -> FetchResult<i64> {
        let body = with_timeout(&self.timer, self.timeout, api::fetch_text(STARTUP_PATH)).await?;
        parse_startup(&body)
    }
}

/// Parse the plain-text startup timestamp.
///
/// Only the leading integer counts, so `"150.0"` or `"150\n"` read as 150.
pub fn parse_startup(body: &str) -> FetchResult<i64> {
    let text = body.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len() - sign_len);
    text[..sign_len + digits]
        .parse::<i64>()
        .map_err(|e| FetchError::Decode(format!("startup timestamp {:?}: {}", body, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_startup() {
        assert_eq!(parse_startup("1700000000\n"), Ok(1_700_000_000));
        assert_eq!(parse_startup(" 150 "), Ok(150));
        assert_eq!(parse_startup("150.0"), Ok(150));
        assert_eq!(parse_startup("1700000000 (utc)"), Ok(1_700_000_000));
        assert_eq!(parse_startup("-1"), Ok(-1));
        assert!(matches!(parse_startup("soon"), Err(FetchError::Decode(_))));
        assert!(matches!(parse_startup(""), Err(FetchError::Decode(_))));
        assert!(matches!(parse_startup("-"), Err(FetchError::Decode(_))));
    }
}
