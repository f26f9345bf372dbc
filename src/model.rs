//! Wire types for the content backend.
//!
//! Every value here is a read-only snapshot: the backend owns assets and their
//! moderation state, the front end only fetches and renders them.

use chrono::{Local, TimeZone};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Backend asset identifier
pub type AssetId = u64;

/// Slideshow content keyed by asset id (`api/slideshow/content`)
pub type SlideshowContent = BTreeMap<AssetId, Asset>;

/// Thumbnail width used by gallery cards
pub const CARD_THUMB_SIZE: u32 = 328;

/// Thumbnail width used by the per-room history columns
pub const HISTORY_THUMB_SIZE: u32 = 194;

/// Media kind as reported by the backend (`type` / `filetype`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetKind {
    Image,
    Video,
    /// Anything the slideshow does not know how to display
    Other(String),
}

impl From<String> for AssetKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Other(s),
        }
    }
}

impl From<AssetKind> for String {
    fn from(kind: AssetKind) -> Self {
        kind.to_string()
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
            Self::Other(kind) => write!(f, "{}", kind),
        }
    }
}

/// Moderation state of an asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModerationState {
    #[default]
    New,
    Review,
    Confirmed,
    Rejected,
    Deleted,
    Other(String),
}

impl From<String> for ModerationState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "new" => Self::New,
            "review" => Self::Review,
            "confirmed" => Self::Confirmed,
            "rejected" => Self::Rejected,
            "deleted" => Self::Deleted,
            _ => Self::Other(s),
        }
    }
}

impl From<ModerationState> for String {
    fn from(state: ModerationState) -> Self {
        state.to_string()
    }
}

impl std::fmt::Display for ModerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Review => write!(f, "review"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Rejected => write!(f, "rejected"),
            Self::Deleted => write!(f, "deleted"),
            Self::Other(state) => write!(f, "{}", state),
        }
    }
}

/// A single uploaded media item with its moderation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Sent as a number by some endpoints and as a string by others
    #[serde(deserialize_with = "deserialize_asset_id")]
    pub id: AssetId,
    /// Owning user (history entries call this `user`)
    #[serde(default, alias = "user")]
    pub username: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumb: String,
    /// Kind used by the slideshow endpoint
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AssetKind>,
    /// Kind used by the gallery and moderation endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<AssetKind>,
    #[serde(default)]
    pub state: ModerationState,
    #[serde(default)]
    pub moderated_by: Option<String>,
    #[serde(default)]
    pub moderate_url: Option<String>,
    /// Start of the visibility window (unix seconds)
    #[serde(default)]
    pub starts: Option<i64>,
    /// End of the visibility window (unix seconds)
    #[serde(default)]
    pub ends: Option<i64>,
}

fn deserialize_asset_id<'de, D>(deserializer: D) -> Result<AssetId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(AssetId),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid asset id {:?}", text))),
    }
}

impl Asset {
    /// Media kind, preferring `type` and falling back to `filetype`.
    pub fn media_kind(&self) -> Option<&AssetKind> {
        self.kind.as_ref().or(self.filetype.as_ref())
    }

    pub fn is_video(&self) -> bool {
        matches!(self.media_kind(), Some(AssetKind::Video))
    }

    /// Thumbnail URL with server-side resizing parameters
    pub fn thumb_url(&self, size: u32) -> String {
        format!("{}?size={}&crop=none", self.thumb, size)
    }
}

/// An asset as it was shown in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShownAsset {
    #[serde(flatten)]
    pub asset: Asset,
    /// When it was shown (unix seconds)
    pub shown: i64,
}

impl ShownAsset {
    /// Whole seconds between `shown` and `now`
    pub fn seconds_since(&self, now: f64) -> i64 {
        (now - self.shown as f64).floor() as i64
    }
}

/// Response of `content/last`: rooms in display order with their recent assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastResponse {
    #[serde(default)]
    pub last: Vec<(String, Vec<ShownAsset>)>,
}

/// Render an optional unix timestamp as local date and time.
pub fn format_epoch(epoch: Option<i64>) -> String {
    match epoch.filter(|e| *e != 0) {
        None => "None set".to_string(),
        Some(secs) => Local
            .timestamp_opt(secs, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "None set".to_string()),
    }
}
