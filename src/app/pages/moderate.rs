//! Moderation page component.
//!
//! Shows one asset with its moderation metadata and sends a single
//! confirm/reject decision.

use dioxus::prelude::*;
use tracing::{info, warn};

use crate::app::api::{self, AWAITING_MODERATION_PATH, LIVE_PATH, UI_SETTINGS_PATH};
use crate::app::components::Layout;
use crate::model::{format_epoch, Asset, AssetId};
use crate::moderation::{
    find_asset, ModerationDecision, ModerationMode, ModerationPhase, UiSettings,
};

/// Moderation page component.
#[component]
pub fn Moderate(id: AssetId) -> Element {
    let settings = use_resource(|| async {
        api::fetch_json::<UiSettings>(UI_SETTINGS_PATH)
            .await
            .unwrap_or_default()
    });

    let asset = use_resource(move || async move {
        let queue = api::fetch_json::<Vec<Asset>>(AWAITING_MODERATION_PATH)
            .await
            .unwrap_or_default();
        let live = api::fetch_json::<Vec<Asset>>(LIVE_PATH)
            .await
            .unwrap_or_default();
        find_asset(id, &queue, &live)
    });

    let content = match asset.read().clone() {
        None => rsx! {
            article { aria_busy: "true", "Loading asset..." }
        },
        Some(None) => rsx! {
            article { "Asset not found." }
        },
        Some(Some(asset)) => {
            let mode = settings
                .read()
                .clone()
                .map(|s| s.moderation_mode)
                .unwrap_or_default();
            rsx! {
                ModerationPanel { asset, mode }
            }
        }
    };

    rsx! {
        Layout {
            title: "Moderate".to_string(),
            nav_active: "moderate".to_string(),
            {content}
        }
    }
}

#[component]
fn ModerationPanel(asset: Asset, mode: ModerationMode) -> Element {
    let mut phase = use_signal(ModerationPhase::default);
    let asset_id = asset.id;

    let mut decide = move |decision: ModerationDecision| {
        if !phase.write().submit(mode) {
            return;
        }
        let submitted = phase.peek().clone();

        spawn(async move {
            let result = api::post_no_response(&decision.path(asset_id)).await;
            match &result {
                Ok(()) => info!("asset {} moderated: {}", asset_id, decision.as_str()),
                Err(e) => warn!("moderating asset {} failed: {}", asset_id, e),
            }
            phase.set(submitted.on_response(mode, &result));
        });
    };

    let current = phase();
    let moderated_by = asset.moderated_by.clone().unwrap_or_default();
    let starts = format_epoch(asset.starts);
    let ends = format_epoch(asset.ends);

    let status = match current.clone() {
        ModerationPhase::Pending => rsx! {},
        ModerationPhase::Submitting => rsx! {
            p { aria_busy: "true", "Saving decision..." }
        },
        ModerationPhase::Completed => rsx! {
            p { class: "notice-ok", "Thanks for moderating." }
        },
        ModerationPhase::Failed(message) => rsx! {
            p { class: "notice-err", "{message}" }
        },
    };

    rsx! {
        h2 { "Upload by {asset.username}" }

        if asset.is_video() {
            video {
                src: "{asset.url}",
                width: "1920",
                height: "1080",
                style: "width:100%;height:auto;",
                controls: true,
                autoplay: true,
                r#loop: true,
                muted: true,
            }
        } else {
            img { src: "{asset.url}", style: "width:100%;" }
        }
        hr {}

        if current.shows_controls() {
            p {
                "Current state: " strong { "{asset.state}" } br {}
                "Moderated by: " strong { "{moderated_by}" } br {}
                "Start time: " strong { "{starts}" } br {}
                "End time: " strong { "{ends}" }
            }
            div { class: "decision",
                button {
                    onclick: move |_| decide(ModerationDecision::Confirm),
                    "Confirm"
                }
                button {
                    class: "secondary",
                    onclick: move |_| decide(ModerationDecision::Reject),
                    "Reject"
                }
            }
        }

        {status}
    }
}
