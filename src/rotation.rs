//! Slideshow rotation order.
//!
//! Walks the live asset set in a shuffled order. Every completed pass is
//! followed by a fresh shuffle, and a position that no longer resolves (the
//! asset expired or was removed between polls) restarts the rotation from the
//! start of a new shuffle instead of failing.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::model::{Asset, AssetId, SlideshowContent};

/// Shuffled traversal over the current slideshow content.
pub struct Rotation<R = StdRng> {
    /// Last fetched asset set, replaced wholesale on every refresh
    content: SlideshowContent,
    /// Ids of `content` at the time of the last shuffle
    shuffled: Vec<AssetId>,
    /// Asset currently on screen (`None` until the first advance)
    currently_showing: Option<AssetId>,
    rng: R,
}

impl Rotation<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for Rotation<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Rotation<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            content: SlideshowContent::new(),
            shuffled: Vec::new(),
            currently_showing: None,
            rng,
        }
    }

    /// Replace the asset set. The shuffled order and position are kept and
    /// resolved lazily on the next advance.
    pub fn replace_content(&mut self, content: SlideshowContent) {
        self.content = content;
    }

    pub fn content(&self) -> &SlideshowContent {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn currently_showing(&self) -> Option<AssetId> {
        self.currently_showing
    }

    pub fn shuffled(&self) -> &[AssetId] {
        &self.shuffled
    }

    /// Regenerate the shuffled order as a uniform permutation of the current keys.
    pub fn shuffle_content(&mut self) {
        debug!("shuffling {} assets", self.content.len());
        let mut ids: Vec<AssetId> = self.content.keys().copied().collect();
        ids.shuffle(&mut self.rng);
        self.shuffled = ids;
    }

    /// Advance to the next asset and return it.
    ///
    /// Returns `None` only when there is no content at all.
    pub fn next_asset(&mut self) -> Option<&Asset> {
        if self.shuffled.is_empty() {
            self.shuffle_content();
        }

        let successor = self.currently_showing.and_then(|current| {
            self.shuffled
                .windows(2)
                .find(|pair| pair[0] == current)
                .map(|pair| pair[1])
        });

        let next = match successor.filter(|id| self.content.contains_key(id)) {
            Some(id) => id,
            None => {
                // End of the pass, or the position went stale
                self.shuffle_content();
                *self.shuffled.first()?
            }
        };

        self.currently_showing = Some(next);
        self.content.get(&next)
    }
}
