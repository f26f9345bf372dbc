//! Moderation decisions and how the view reacts to them.

use serde::{Deserialize, Serialize};

use crate::error::FetchResult;
use crate::model::{Asset, AssetId};

/// Outcome a moderator can pick for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationDecision {
    Confirm,
    Reject,
}

impl ModerationDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Reject => "reject",
        }
    }

    /// Backend path that records this decision
    pub fn path(self, id: AssetId) -> String {
        format!("/content/moderate/{}/{}", id, self.as_str())
    }
}

/// Whether a decision waits for the backend before thanking the moderator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationMode {
    /// Thank immediately; a failed write is only logged
    #[default]
    Optimistic,
    /// Thank only after the backend accepted the decision
    Confirmed,
}

/// Settings the server hands to the front end (`/ui/settings`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default)]
    pub moderation_mode: ModerationMode,
}

/// Where the moderation panel is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModerationPhase {
    /// Decision buttons shown
    #[default]
    Pending,
    /// Decision sent, waiting for the backend
    Submitting,
    /// Thanks message shown
    Completed,
    Failed(String),
}

impl ModerationPhase {
    pub fn shows_controls(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Phase right after a decision was clicked
    pub fn on_submit(mode: ModerationMode) -> Self {
        match mode {
            ModerationMode::Optimistic => Self::Completed,
            ModerationMode::Confirmed => Self::Submitting,
        }
    }

    /// Record a clicked decision. Returns `false`, leaving the phase alone,
    /// when a decision was already made for this asset.
    pub fn submit(&mut self, mode: ModerationMode) -> bool {
        if !self.shows_controls() {
            return false;
        }
        *self = Self::on_submit(mode);
        true
    }

    /// Phase once the backend answered
    pub fn on_response(self, mode: ModerationMode, result: &FetchResult<()>) -> Self {
        match (mode, result) {
            (ModerationMode::Optimistic, _) => self,
            (ModerationMode::Confirmed, Ok(())) => Self::Completed,
            (ModerationMode::Confirmed, Err(e)) => {
                Self::Failed(format!("Moderation was not saved: {}", e))
            }
        }
    }
}

/// Look an asset up in the moderation queue first, then among live assets.
pub fn find_asset(id: AssetId, queue: &[Asset], live: &[Asset]) -> Option<Asset> {
    queue
        .iter()
        .chain(live.iter())
        .find(|asset| asset.id == id)
        .cloned()
}
