//! Recently shown page component.
//!
//! One column per room with the assets most recently shown there. The list is
//! re-fetched every [`HISTORY_REFRESH_INTERVAL`]; the "seconds ago" labels
//! follow a clock that ticks once per second.

use dioxus::prelude::*;
use std::time::Duration;
use tracing::debug;

use crate::app::api::{self, LAST_PATH};
use crate::app::components::Layout;
use crate::model::{LastResponse, ShownAsset, HISTORY_THUMB_SIZE};
use crate::timer::{self, now_unix};

pub const HISTORY_REFRESH_INTERVAL: Duration = Duration::from_millis(20_000);
const CLOCK_INTERVAL: Duration = Duration::from_millis(1_000);

/// Recently shown page component.
#[component]
pub fn Last() -> Element {
    let mut rooms = use_signal(Vec::<(String, Vec<ShownAsset>)>::new);
    let mut now = use_signal(now_unix);

    use_future(move || async move {
        loop {
            match api::fetch_json::<LastResponse>(LAST_PATH).await {
                Ok(resp) => rooms.set(resp.last),
                Err(e) => debug!("keeping previous history, {}", e),
            }
            timer::sleep(HISTORY_REFRESH_INTERVAL).await;
        }
    });

    use_future(move || async move {
        loop {
            timer::sleep(CLOCK_INTERVAL).await;
            now.set(now_unix());
        }
    });

    let now_secs = now();

    rsx! {
        Layout {
            title: "Recently shown".to_string(),
            nav_active: "last".to_string(),

            h1 { "Recently shown" }

            div { class: "room-grid",
                for (room, shown) in rooms() {
                    div { key: "{room}",
                        h3 { "{room}" }
                        for entry in shown {
                            ShownEntry { key: "{entry.asset.id}-{entry.shown}", entry: entry.clone(), now: now_secs }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ShownEntry(entry: ShownAsset, now: f64) -> Element {
    let thumb = entry.asset.thumb_url(HISTORY_THUMB_SIZE);
    let ago = entry.seconds_since(now);

    rsx! {
        figure {
            a { href: "{entry.asset.url}",
                img { src: "{thumb}" }
            }
            figcaption {
                small { "{entry.asset.username}, {ago}s ago" }
            }
        }
    }
}
