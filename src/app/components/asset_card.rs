//! Asset cards used by the gallery and the moderation queue.

use dioxus::prelude::*;

use crate::model::{Asset, CARD_THUMB_SIZE};

/// Preview card: owner, thumbnail linking to the full asset, moderation info.
#[component]
pub fn AssetPreview(asset: Asset) -> Element {
    let thumb = asset.thumb_url(CARD_THUMB_SIZE);

    rsx! {
        article { class: "asset-live",
            header { "Project by {asset.username}" }
            a { href: "{asset.url}", target: "_blank", rel: "noopener",
                img { src: "{thumb}", alt: "Upload by {asset.username}" }
            }
            if let Some(ref moderator) = asset.moderated_by {
                p { "Moderated by: {moderator}" }
            }
            if let Some(ref moderate_url) = asset.moderate_url {
                a { role: "button", class: "secondary", href: "{moderate_url}", "Moderate" }
            }
        }
    }
}

/// Grid of asset cards with an empty-state message.
///
/// `assets` is `None` while the first fetch is still outstanding.
#[component]
pub fn AssetGrid(assets: Option<Vec<Asset>>, empty_message: String) -> Element {
    match assets {
        None => rsx! {
            article { aria_busy: "true", "Loading..." }
        },
        Some(list) if list.is_empty() => rsx! {
            article { "{empty_message}" }
        },
        Some(list) => rsx! {
            div { class: "asset-grid",
                for asset in list {
                    AssetPreview { key: "{asset.id}", asset: asset.clone() }
                }
            }
        },
    }
}
