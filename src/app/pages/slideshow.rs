//! Kiosk slideshow page.
//!
//! Full-screen, no navigation. The [`SlideshowController`] drives everything;
//! this page only maps its view calls onto a [`SlideState`] signal and the
//! browser's media elements.

use dioxus::prelude::*;
use futures::future::{FutureExt, LocalBoxFuture};

use crate::app::media::{self, PreloadedImage};
use crate::error::FetchResult;
use crate::slideshow::{HttpSlideshowBackend, SlideState, SlideshowBackend, SlideshowView};

const IMAGE_ID: &str = "slideshow-image";
const VIDEO_ID: &str = "slideshow-video";

const SLIDESHOW_STYLES: &str = r#"
html, body { margin: 0; padding: 0; background: #000; overflow: hidden; cursor: none; }
#slideshow img, #slideshow video {
    position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; object-fit: contain;
}
#error { color: #fff; font-family: sans-serif; font-size: 3rem; text-align: center; padding-top: 40vh; }
"#;

/// Slideshow view backed by a Dioxus signal.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Clone, Copy)]
struct SignalView {
    state: Signal<SlideState>,
}

impl SlideshowView for SignalView {
    type Surface = PreloadedImage;

    fn begin_preload(&self, url: &str) -> LocalBoxFuture<'static, FetchResult<PreloadedImage>> {
        media::preload_image(url.to_string()).boxed_local()
    }

    fn commit(&self, surface: PreloadedImage) {
        media::pause_video(VIDEO_ID);
        let mut state = self.state;
        state.write().commit_image(surface.url);
    }

    fn play_video(&self, url: &str) {
        let mut state = self.state;
        state.write().play_video(url.to_string());
        media::play_video(VIDEO_ID, url);
    }

    fn clear_error(&self) {
        let mut state = self.state;
        state.write().begin_tick();
    }

    fn show_error(&self, message: &str) {
        let mut state = self.state;
        state.write().show_error(message.to_string());
    }

    fn reload(&self) {
        media::reload_page();
    }
}

fn display(visible: bool) -> &'static str {
    if visible {
        "display:block;"
    } else {
        "display:none;"
    }
}

/// Slideshow page component.
#[component]
pub fn Slideshow() -> Element {
    let state = use_signal(SlideState::default);

    // Backend startup time as of rendering, carried to the client with the page
    #[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
    let rendered_startup = use_server_future(|| async {
        HttpSlideshowBackend::new().fetch_startup().await.ok()
    })?;

    // Loops only run in the browser; server rendering emits the hidden initial state
    use_future(move || async move {
        #[cfg(target_arch = "wasm32")]
        {
            use crate::slideshow::SlideshowController;
            use crate::timer::RuntimeTimer;

            let mut controller = SlideshowController::new(
                HttpSlideshowBackend::new(),
                SignalView { state },
                RuntimeTimer,
            );
            let rendered = *rendered_startup.peek();
            if let Some(Some(startup)) = rendered {
                controller = controller.with_page_startup(startup);
            }
            controller.run().await;
        }
    });

    let slide = state();
    let error_text = slide.error.clone().unwrap_or_default();

    rsx! {
        document::Title { "Slideshow" }
        document::Style { {SLIDESHOW_STYLES} }

        div { id: "slideshow", style: display(slide.slideshow_visible),
            img {
                id: IMAGE_ID,
                src: slide.image_src.clone(),
                style: display(slide.image_visible),
            }
            video {
                id: VIDEO_ID,
                src: slide.video_src.clone(),
                autoplay: true,
                muted: true,
                style: display(slide.video_visible),
            }
        }
        div { id: "error", style: display(slide.error.is_some()),
            p { id: "error-text", "{error_text}" }
        }
    }
}
