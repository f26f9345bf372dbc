//! Kiosk slideshow controller.
//!
//! Three independent loops share one [`Rotation`]:
//! - refresh: re-fetch the live asset set every [`REFRESH_INTERVAL`]
//! - display: advance to the next asset every [`DISPLAY_INTERVAL`], starting
//!   as soon as the first non-empty asset set arrives
//! - restart check: reload the page every time the backend reports a newer
//!   startup time than the one seen when the page loaded
//!
//! Fetching, sleeping and drawing are injected so the whole cycle runs
//! without a browser in tests.

pub mod backend;
pub mod display;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::future::{select, Either, LocalBoxFuture};
use futures::pin_mut;
use rand::rngs::StdRng;
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::FetchResult;
use crate::model::SlideshowContent;
use crate::rotation::Rotation;
use crate::timer::Timer;

pub use backend::HttpSlideshowBackend;
pub use display::{DisplayPlan, SlideState};

pub const REFRESH_INTERVAL: Duration = Duration::from_millis(300_000);
pub const DISPLAY_INTERVAL: Duration = Duration::from_millis(10_000);
pub const RESTART_CHECK_INTERVAL: Duration = Duration::from_millis(42_000);
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Source of slideshow content and backend startup time
#[async_trait(?Send)]
pub trait SlideshowBackend {
    async fn fetch_content(&self) -> FetchResult<SlideshowContent>;
    async fn fetch_startup(&self) -> FetchResult<i64>;
}

/// The surface the slideshow draws on.
///
/// Images are swapped in two phases: [`begin_preload`](Self::begin_preload)
/// loads off-screen, [`commit`](Self::commit) makes the loaded image visible.
pub trait SlideshowView {
    type Surface;

    fn begin_preload(&self, url: &str) -> LocalBoxFuture<'static, FetchResult<Self::Surface>>;
    fn commit(&self, surface: Self::Surface);
    fn play_video(&self, url: &str);
    /// Show the slideshow and hide the error panel
    fn clear_error(&self);
    fn show_error(&self, message: &str);
    fn reload(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideshowTiming {
    pub refresh: Duration,
    pub display: Duration,
    pub restart_check: Duration,
}

impl Default for SlideshowTiming {
    fn default() -> Self {
        Self {
            refresh: REFRESH_INTERVAL,
            display: DISPLAY_INTERVAL,
            restart_check: RESTART_CHECK_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Content replaced; display already running or nothing to show
    Updated { assets: usize },
    /// First non-empty content: the display loop has been started
    StartedDisplay { assets: usize },
    /// Fetch failed, previous content kept
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartDecision {
    /// No startup time came with the page; the first successful check
    /// becomes the baseline
    Baseline(i64),
    Unchanged,
    Reload,
    Failed,
}

/// Whether a backend startup time means the page is running stale code
pub fn should_reload(page_startup: i64, server_startup: i64) -> bool {
    server_startup > 0 && page_startup < server_startup
}

pub struct SlideshowController<B, V, T, R = StdRng> {
    backend: B,
    view: V,
    timer: T,
    timing: SlideshowTiming,
    rotation: RefCell<Rotation<R>>,
    display_started: Cell<bool>,
    start_display: RefCell<Option<oneshot::Sender<()>>>,
    display_ready: RefCell<Option<oneshot::Receiver<()>>>,
    page_startup: Cell<Option<i64>>,
}

impl<B, V, T> SlideshowController<B, V, T, StdRng>
where
    B: SlideshowBackend,
    V: SlideshowView,
    T: Timer,
{
    pub fn new(backend: B, view: V, timer: T) -> Self {
        Self::with_rotation(backend, view, timer, SlideshowTiming::default(), Rotation::new())
    }
}

impl<B, V, T, R> SlideshowController<B, V, T, R>
where
    B: SlideshowBackend,
    V: SlideshowView,
    T: Timer,
    R: Rng,
{
    pub fn with_rotation(
        backend: B,
        view: V,
        timer: T,
        timing: SlideshowTiming,
        rotation: Rotation<R>,
    ) -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            backend,
            view,
            timer,
            timing,
            rotation: RefCell::new(rotation),
            display_started: Cell::new(false),
            start_display: RefCell::new(Some(tx)),
            display_ready: RefCell::new(Some(rx)),
            page_startup: Cell::new(None),
        }
    }

    /// Use a startup time known at page load instead of the first check
    pub fn with_page_startup(self, startup: i64) -> Self {
        self.page_startup.set(Some(startup));
        self
    }

    pub fn page_startup(&self) -> Option<i64> {
        self.page_startup.get()
    }

    pub fn display_started(&self) -> bool {
        self.display_started.get()
    }

    pub fn currently_showing(&self) -> Option<crate::model::AssetId> {
        self.rotation.borrow().currently_showing()
    }

    pub fn asset_count(&self) -> usize {
        self.rotation.borrow().len()
    }

    /// Run all loops until the future is dropped.
    pub async fn run(&self) {
        let ready = self.display_ready.borrow_mut().take();
        futures::join!(
            self.refresh_loop(),
            self.display_loop(ready),
            self.restart_loop()
        );
    }

    async fn refresh_loop(&self) {
        loop {
            self.refresh().await;
            self.timer.sleep(self.timing.refresh).await;
        }
    }

    async fn display_loop(&self, ready: Option<oneshot::Receiver<()>>) {
        let Some(ready) = ready else {
            return;
        };
        if ready.await.is_err() {
            return;
        }

        loop {
            // A preload slower than one period is abandoned for the next asset
            let tick = self.tick();
            let wait = self.timer.sleep(self.timing.display);
            pin_mut!(tick, wait);
            if let Either::Left((_, wait)) = select(tick, wait).await {
                wait.await;
            }
        }
    }

    async fn restart_loop(&self) {
        loop {
            self.check_restart().await;
            self.timer.sleep(self.timing.restart_check).await;
        }
    }

    /// Fetch the live asset set and replace the rotation's content.
    pub async fn refresh(&self) -> RefreshOutcome {
        info!("loading live assets");
        let content = match self.backend.fetch_content().await {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to load live assets: {}", e);
                return RefreshOutcome::Failed;
            }
        };

        let assets = content.len();
        info!("got live assets, {} assets in total", assets);
        self.rotation.borrow_mut().replace_content(content);

        if self.display_started.get() || assets == 0 {
            return RefreshOutcome::Updated { assets };
        }

        self.display_started.set(true);
        if let Some(tx) = self.start_display.borrow_mut().take() {
            let _ = tx.send(());
        }
        RefreshOutcome::StartedDisplay { assets }
    }

    /// Advance the rotation and put the next asset on screen.
    pub async fn tick(&self) -> Option<DisplayPlan> {
        self.view.clear_error();

        let next = self.rotation.borrow_mut().next_asset().cloned();
        let Some(asset) = next else {
            debug!("no assets to show");
            return None;
        };

        let plan = DisplayPlan::for_asset(&asset);
        match &plan {
            DisplayPlan::Preload(url) => {
                info!("next asset is {} (image)", url);
                match self.view.begin_preload(url).await {
                    Ok(surface) => self.view.commit(surface),
                    Err(e) => warn!("keeping previous image, {}", e),
                }
            }
            DisplayPlan::Video(url) => {
                info!("next asset is {} (video)", url);
                self.view.play_video(url);
            }
            DisplayPlan::Error(message) => {
                warn!("{} for asset {}", message, asset.url);
                self.view.show_error(message);
            }
        }
        Some(plan)
    }

    /// Compare the backend's startup time with the page's and reload if newer.
    pub async fn check_restart(&self) -> RestartDecision {
        info!("checking if slideshow needs reloading because server has restarted");
        let startup = match self.backend.fetch_startup().await {
            Ok(startup) => startup,
            Err(e) => {
                debug!("startup check failed: {}", e);
                return RestartDecision::Failed;
            }
        };

        let Some(page_startup) = self.page_startup.get() else {
            self.page_startup.set(Some(startup));
            return RestartDecision::Baseline(startup);
        };

        if should_reload(page_startup, startup) {
            warn!("startup time has changed, reloading GUI");
            self.view.reload();
            RestartDecision::Reload
        } else {
            info!("slideshow does not need reloading");
            RestartDecision::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::model::Asset;
    use futures::FutureExt;
    use rand::SeedableRng;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeBackend {
        content: RefCell<VecDeque<FetchResult<SlideshowContent>>>,
        startup: RefCell<VecDeque<FetchResult<i64>>>,
    }

    impl FakeBackend {
        fn push_content(&self, content: FetchResult<SlideshowContent>) {
            self.content.borrow_mut().push_back(content);
        }

        fn push_startup(&self, startup: FetchResult<i64>) {
            self.startup.borrow_mut().push_back(startup);
        }
    }

    #[async_trait(?Send)]
    impl SlideshowBackend for Rc<FakeBackend> {
        async fn fetch_content(&self) -> FetchResult<SlideshowContent> {
            self.content
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(FetchError::Network("no response queued".into())))
        }

        async fn fetch_startup(&self) -> FetchResult<i64> {
            self.startup
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(FetchError::Network("no response queued".into())))
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum ViewEvent {
        Preload(String),
        Commit(String),
        Video(String),
        ClearError,
        Error(String),
        Reload,
    }

    #[derive(Default)]
    struct FakeView {
        events: RefCell<Vec<ViewEvent>>,
        fail_preload: Cell<bool>,
    }

    impl SlideshowView for Rc<FakeView> {
        type Surface = String;

        fn begin_preload(&self, url: &str) -> LocalBoxFuture<'static, FetchResult<String>> {
            self.events
                .borrow_mut()
                .push(ViewEvent::Preload(url.to_string()));
            let result = if self.fail_preload.get() {
                Err(FetchError::Preload(url.to_string()))
            } else {
                Ok(url.to_string())
            };
            futures::future::ready(result).boxed_local()
        }

        fn commit(&self, surface: String) {
            self.events.borrow_mut().push(ViewEvent::Commit(surface));
        }

        fn play_video(&self, url: &str) {
            self.events
                .borrow_mut()
                .push(ViewEvent::Video(url.to_string()));
        }

        fn clear_error(&self) {
            self.events.borrow_mut().push(ViewEvent::ClearError);
        }

        fn show_error(&self, message: &str) {
            self.events
                .borrow_mut()
                .push(ViewEvent::Error(message.to_string()));
        }

        fn reload(&self) {
            self.events.borrow_mut().push(ViewEvent::Reload);
        }
    }

    struct InstantTimer;

    #[async_trait(?Send)]
    impl Timer for InstantTimer {
        async fn sleep(&self, _period: Duration) {}
    }

    /// Pends once per sleep so looping futures hand control back
    struct YieldTimer;

    #[async_trait(?Send)]
    impl Timer for YieldTimer {
        async fn sleep(&self, _period: Duration) {
            tokio::task::yield_now().await;
        }
    }

    type TestController = SlideshowController<Rc<FakeBackend>, Rc<FakeView>, InstantTimer>;

    fn asset(id: u64, kind: &str) -> Asset {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "url": format!("https://cdn/{}", id),
            "type": kind,
        }))
        .unwrap()
    }

    fn content(assets: &[(u64, &str)]) -> SlideshowContent {
        assets
            .iter()
            .map(|(id, kind)| (*id, asset(*id, kind)))
            .collect()
    }

    fn controller() -> (TestController, Rc<FakeBackend>, Rc<FakeView>) {
        let backend = Rc::new(FakeBackend::default());
        let view = Rc::new(FakeView::default());
        let controller = SlideshowController::with_rotation(
            backend.clone(),
            view.clone(),
            InstantTimer,
            SlideshowTiming::default(),
            Rotation::with_rng(StdRng::seed_from_u64(42)),
        );
        (controller, backend, view)
    }

    #[tokio::test]
    async fn test_first_non_empty_refresh_starts_display() {
        let (controller, backend, _view) = controller();
        backend.push_content(Ok(SlideshowContent::new()));
        backend.push_content(Ok(content(&[(1, "image")])));
        backend.push_content(Ok(content(&[(1, "image"), (2, "video")])));

        assert_eq!(
            controller.refresh().await,
            RefreshOutcome::Updated { assets: 0 }
        );
        assert!(!controller.display_started());

        assert_eq!(
            controller.refresh().await,
            RefreshOutcome::StartedDisplay { assets: 1 }
        );
        assert!(controller.display_started());

        assert_eq!(
            controller.refresh().await,
            RefreshOutcome::Updated { assets: 2 }
        );
        assert_eq!(controller.asset_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_content() {
        let (controller, backend, _view) = controller();
        backend.push_content(Ok(content(&[(1, "image"), (2, "image")])));
        backend.push_content(Err(FetchError::Timeout(10_000)));

        controller.refresh().await;
        assert_eq!(controller.refresh().await, RefreshOutcome::Failed);
        assert_eq!(controller.asset_count(), 2);
    }

    #[tokio::test]
    async fn test_image_is_committed_after_preload() {
        let (controller, backend, view) = controller();
        backend.push_content(Ok(content(&[(1, "image")])));
        controller.refresh().await;

        let plan = controller.tick().await;
        assert_eq!(plan, Some(DisplayPlan::Preload("https://cdn/1".to_string())));
        assert_eq!(
            *view.events.borrow(),
            vec![
                ViewEvent::ClearError,
                ViewEvent::Preload("https://cdn/1".to_string()),
                ViewEvent::Commit("https://cdn/1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_preload_keeps_previous_image() {
        let (controller, backend, view) = controller();
        backend.push_content(Ok(content(&[(1, "image")])));
        controller.refresh().await;
        view.fail_preload.set(true);

        controller.tick().await;
        assert!(!view
            .events
            .borrow()
            .iter()
            .any(|e| matches!(e, ViewEvent::Commit(_))));
    }

    #[tokio::test]
    async fn test_video_plays_without_preload() {
        let (controller, backend, view) = controller();
        backend.push_content(Ok(content(&[(9, "video")])));
        controller.refresh().await;

        controller.tick().await;
        assert_eq!(
            *view.events.borrow(),
            vec![
                ViewEvent::ClearError,
                ViewEvent::Video("https://cdn/9".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_repeated_video_is_played_every_time() {
        let (controller, backend, view) = controller();
        backend.push_content(Ok(content(&[(1, "video"), (2, "image")])));
        controller.refresh().await;

        let mut videos = 0;
        for _ in 0..8 {
            let plan = controller.tick().await;
            if plan == Some(DisplayPlan::Video("https://cdn/1".to_string())) {
                videos += 1;
                assert_eq!(
                    view.events.borrow().last(),
                    Some(&ViewEvent::Video("https://cdn/1".to_string()))
                );
            }
        }
        // Every pass over two assets shows the video once
        assert_eq!(videos, 4);
        let played = view
            .events
            .borrow()
            .iter()
            .filter(|e| matches!(e, ViewEvent::Video(_)))
            .count();
        assert_eq!(played, 4);
    }

    #[tokio::test]
    async fn test_unknown_kind_shows_error_panel() {
        let (controller, backend, view) = controller();
        backend.push_content(Ok(content(&[(3, "gif")])));
        controller.refresh().await;

        controller.tick().await;
        assert_eq!(
            view.events.borrow().last(),
            Some(&ViewEvent::Error("unknown asset type gif".to_string()))
        );
    }

    #[tokio::test]
    async fn test_tick_without_content_is_noop() {
        let (controller, _backend, view) = controller();
        assert_eq!(controller.tick().await, None);
        assert_eq!(*view.events.borrow(), vec![ViewEvent::ClearError]);
    }

    #[tokio::test]
    async fn test_removed_asset_resumes_rotation() {
        let (controller, backend, _view) = controller();
        backend.push_content(Ok(content(&[(1, "image"), (2, "image"), (3, "image")])));
        backend.push_content(Ok(content(&[(7, "image"), (8, "image")])));

        controller.refresh().await;
        controller.tick().await;
        controller.refresh().await;

        controller.tick().await;
        let current = controller.currently_showing().unwrap();
        assert!([7, 8].contains(&current));
    }

    #[tokio::test]
    async fn test_restart_check_reloads_on_newer_startup() {
        let (controller, backend, view) = controller();
        let controller = controller.with_page_startup(100);
        backend.push_startup(Ok(90));
        backend.push_startup(Ok(100));
        backend.push_startup(Ok(150));

        assert_eq!(controller.check_restart().await, RestartDecision::Unchanged);
        assert_eq!(controller.check_restart().await, RestartDecision::Unchanged);
        assert_eq!(controller.check_restart().await, RestartDecision::Reload);
        assert_eq!(view.events.borrow().last(), Some(&ViewEvent::Reload));
    }

    #[tokio::test]
    async fn test_rendered_startup_survives_backend_outage() {
        let (controller, backend, view) = controller();
        let controller = controller.with_page_startup(100);
        backend.push_startup(Err(FetchError::Network("connection refused".into())));
        backend.push_startup(Ok(150));

        assert_eq!(controller.check_restart().await, RestartDecision::Failed);
        assert_eq!(controller.check_restart().await, RestartDecision::Reload);
        assert_eq!(controller.page_startup(), Some(100));
        assert_eq!(view.events.borrow().last(), Some(&ViewEvent::Reload));
    }

    #[tokio::test]
    async fn test_first_restart_check_captures_baseline() {
        let (controller, backend, view) = controller();
        backend.push_startup(Err(FetchError::Status(502)));
        backend.push_startup(Ok(100));
        backend.push_startup(Ok(100));

        assert_eq!(controller.check_restart().await, RestartDecision::Failed);
        assert_eq!(
            controller.check_restart().await,
            RestartDecision::Baseline(100)
        );
        assert_eq!(controller.page_startup(), Some(100));
        assert_eq!(controller.check_restart().await, RestartDecision::Unchanged);
        assert!(view.events.borrow().is_empty());
    }

    #[test]
    fn test_should_reload() {
        assert!(should_reload(100, 150));
        assert!(!should_reload(100, 90));
        assert!(!should_reload(100, 100));
        assert!(!should_reload(-5, 0));
    }

    #[tokio::test]
    async fn test_run_shows_first_asset_immediately() {
        let backend = Rc::new(FakeBackend::default());
        let view = Rc::new(FakeView::default());
        let controller = SlideshowController::with_rotation(
            backend.clone(),
            view.clone(),
            YieldTimer,
            SlideshowTiming::default(),
            Rotation::with_rng(StdRng::seed_from_u64(1)),
        );
        backend.push_content(Ok(content(&[(5, "video")])));
        backend.push_startup(Ok(100));

        // The loops never end; poll them for a bounded number of turns
        let run = controller.run();
        let limit = async {
            for _ in 0..50 {
                tokio::task::yield_now().await;
            }
        };
        pin_mut!(run, limit);
        select(run, limit).await;

        assert!(view
            .events
            .borrow()
            .contains(&ViewEvent::Video("https://cdn/5".to_string())));
        assert_eq!(controller.page_startup(), Some(100));
    }
}
