//! Browser media helpers for the slideshow.
//!
//! Outside the browser these are no-ops (images count as loaded at once), so
//! server-side rendering never blocks on them.

use crate::error::FetchResult;

/// An image that finished loading off-screen and can be swapped in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadedImage {
    pub url: String,
}

#[cfg(target_arch = "wasm32")]
pub async fn preload_image(url: String) -> FetchResult<PreloadedImage> {
    use crate::error::FetchError;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let img = web_sys::HtmlImageElement::new()
        .map_err(|e| FetchError::Preload(format!("{:?}", e)))?;

    let (tx, rx) = futures::channel::oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let tx_load = tx.clone();
    let onload = Closure::<dyn FnMut()>::once(move || {
        if let Some(tx) = tx_load.borrow_mut().take() {
            let _ = tx.send(true);
        }
    });
    let onerror = Closure::<dyn FnMut()>::once(move || {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(false);
        }
    });

    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    img.set_src(&url);

    let loaded = rx.await.unwrap_or(false);

    // Detach before the closures are dropped
    img.set_onload(None);
    img.set_onerror(None);
    drop(onload);
    drop(onerror);

    if loaded {
        Ok(PreloadedImage { url })
    } else {
        Err(FetchError::Preload(url))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn preload_image(url: String) -> FetchResult<PreloadedImage> {
    Ok(PreloadedImage { url })
}

#[cfg(target_arch = "wasm32")]
fn video_element(id: &str) -> Option<web_sys::HtmlVideoElement> {
    use wasm_bindgen::JsCast;

    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlVideoElement>()
        .ok()
}

/// Stop the video element and rewind it to the start
pub fn pause_video(id: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(video) = video_element(id) {
            let _ = video.pause();
            video.set_current_time(0.0);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}

/// Point the video element at `url` and start it from the beginning.
///
/// Setting `src` again restarts playback even when the element already holds
/// the same source, which a re-render would leave untouched.
pub fn play_video(id: &str, url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(video) = video_element(id) {
            video.set_src(url);
            let url = url.to_string();
            match video.play() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        tracing::warn!("video {} did not start: {:?}", url, e);
                    }
                }),
                Err(e) => tracing::warn!("video {} did not start: {:?}", url, e),
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (id, url);
}

pub fn reload_page() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}
