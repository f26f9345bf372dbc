//! What the slideshow puts on screen for an asset.

use crate::model::{Asset, AssetKind};

/// How an asset gets onto the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayPlan {
    /// Load the image off-screen first, swap it in once loaded
    Preload(String),
    /// Switch the video element to this source right away
    Video(String),
    /// Replace the slideshow with the error panel
    Error(String),
}

impl DisplayPlan {
    pub fn for_asset(asset: &Asset) -> Self {
        match asset.media_kind() {
            Some(AssetKind::Image) => Self::Preload(asset.url.clone()),
            Some(AssetKind::Video) => Self::Video(asset.url.clone()),
            Some(AssetKind::Other(kind)) => Self::Error(unknown_kind_message(kind)),
            None => Self::Error(unknown_kind_message("undefined")),
        }
    }
}

pub fn unknown_kind_message(kind: &str) -> String {
    format!("unknown asset type {}", kind)
}

/// Visible state of the slideshow page.
///
/// The page starts with everything hidden until the first asset arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideState {
    pub slideshow_visible: bool,
    pub image_src: Option<String>,
    pub image_visible: bool,
    pub video_src: Option<String>,
    pub video_visible: bool,
    /// Error panel text; the panel is shown while this is set
    pub error: Option<String>,
}

impl SlideState {
    /// Every tick starts with the slideshow shown and the error panel hidden
    pub fn begin_tick(&mut self) {
        self.slideshow_visible = true;
        self.error = None;
    }

    /// Swap in an image that has finished loading
    pub fn commit_image(&mut self, url: String) {
        self.video_visible = false;
        self.image_src = Some(url);
        self.image_visible = true;
    }

    pub fn play_video(&mut self, url: String) {
        self.image_visible = false;
        self.video_src = Some(url);
        self.video_visible = true;
    }

    pub fn show_error(&mut self, message: String) {
        self.slideshow_visible = false;
        self.error = Some(message);
    }

    pub fn image_shown(&self) -> bool {
        self.slideshow_visible && self.image_visible
    }

    pub fn video_shown(&self) -> bool {
        self.slideshow_visible && self.video_visible
    }
}
