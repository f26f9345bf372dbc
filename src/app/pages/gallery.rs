//! Gallery page component.
//!
//! Live uploads and the moderation queue, each fetched once on load.

use dioxus::prelude::*;

use crate::app::api::{self, AWAITING_MODERATION_PATH, LIVE_PATH};
use crate::app::components::{AssetGrid, Layout};
use crate::model::Asset;

/// Gallery page component.
#[component]
pub fn Gallery() -> Element {
    let live = use_resource(|| async {
        api::fetch_json::<Vec<Asset>>(LIVE_PATH)
            .await
            .map_err(|e| tracing::debug!("live assets unavailable: {}", e))
            .ok()
    });
    let unmoderated = use_resource(|| async {
        api::fetch_json::<Vec<Asset>>(AWAITING_MODERATION_PATH)
            .await
            .map_err(|e| tracing::debug!("moderation queue unavailable: {}", e))
            .ok()
    });

    // A failed fetch leaves the empty list in place
    let live_list = live.read().clone().map(Option::unwrap_or_default);
    let unmoderated_list = unmoderated.read().clone().map(Option::unwrap_or_default);

    let live_count = live_list.as_ref().map(Vec::len).unwrap_or(0);
    let queue_count = unmoderated_list.as_ref().map(Vec::len).unwrap_or(0);

    rsx! {
        Layout {
            title: "Gallery".to_string(),
            nav_active: "gallery".to_string(),

            h1 { "Gallery" }

            section { id: "live",
                hgroup {
                    h2 { "Live uploads" }
                    p { "{live_count} currently shown" }
                }
                AssetGrid {
                    assets: live_list,
                    empty_message: "No uploads yet.".to_string(),
                }
            }

            section { id: "awaiting-moderation",
                hgroup {
                    h2 { "Awaiting moderation" }
                    p { "{queue_count} in queue" }
                }
                AssetGrid {
                    assets: unmoderated_list,
                    empty_message: "None.".to_string(),
                }
            }
        }
    }
}
