//! Timer seam for polling loops.
//!
//! In the browser sleeps are backed by `setTimeout` (gloo-timers), on the
//! server by tokio. Controllers take a [`Timer`] so tests can run loops
//! without waiting on a real clock.

use async_trait::async_trait;
use futures::future::{select, Either};
use futures::pin_mut;
use std::future::Future;
use std::time::Duration;

use crate::error::{FetchError, FetchResult};

#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, period: Duration);
}

/// Timer backed by the runtime the crate was built for.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuntimeTimer;

#[async_trait(?Send)]
impl Timer for RuntimeTimer {
    async fn sleep(&self, period: Duration) {
        sleep(period).await;
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(period: Duration) {
    gloo_timers::future::sleep(period).await;
}

#[cfg(all(not(target_arch = "wasm32"), feature = "server"))]
pub async fn sleep(period: Duration) {
    tokio::time::sleep(period).await;
}

#[cfg(all(not(target_arch = "wasm32"), not(feature = "server")))]
pub async fn sleep(_period: Duration) {
    futures::future::pending::<()>().await;
}

/// Race `fut` against a deadline on `timer`.
pub async fn with_timeout<T, F, O>(timer: &T, limit: Duration, fut: F) -> FetchResult<O>
where
    T: Timer + ?Sized,
    F: Future<Output = FetchResult<O>>,
{
    let deadline = timer.sleep(limit);
    pin_mut!(fut, deadline);
    match select(fut, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(FetchError::Timeout(limit.as_millis() as u64)),
    }
}

/// Current time in fractional unix seconds
#[cfg(target_arch = "wasm32")]
pub fn now_unix() -> f64 {
    js_sys::Date::now() / 1000.0
}

/// Current time in fractional unix seconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_unix() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InstantTimer;

    #[async_trait(?Send)]
    impl Timer for InstantTimer {
        async fn sleep(&self, _period: Duration) {}
    }

    struct NeverTimer;

    #[async_trait(?Send)]
    impl Timer for NeverTimer {
        async fn sleep(&self, _period: Duration) {
            futures::future::pending::<()>().await;
        }
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result: FetchResult<()> = with_timeout(
            &InstantTimer,
            Duration::from_millis(10_000),
            futures::future::pending(),
        )
        .await;
        assert_eq!(result, Err(FetchError::Timeout(10_000)));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let result = with_timeout(&NeverTimer, Duration::from_secs(1), async {
            Ok::<_, FetchError>(7)
        })
        .await;
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_now_unix_is_seconds() {
        // Sanity bound: after 2020-01-01 and not in milliseconds
        let now = now_unix();
        assert!(now > 1_577_836_800.0);
        assert!(now < 1.0e11);
    }
}
