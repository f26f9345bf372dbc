//! Navigation bar.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "gallery", "last")
    pub active: String,
}

/// (page id, href, label)
const LINKS: [(&str, &str, &str); 3] = [
    ("gallery", "/", "Gallery"),
    ("last", "/last", "Recently shown"),
    ("slideshow", "/slideshow", "Slideshow"),
];

/// Navigation bar marking the active page for assistive tech and styling.
#[component]
pub fn Nav(props: NavProps) -> Element {
    rsx! {
        nav {
            ul {
                li { a { href: "/", strong { "Content Showcase" } } }
            }
            ul {
                for (id, href, label) in LINKS {
                    li {
                        a {
                            href: "{href}",
                            aria_current: if props.active == id { "page" } else { "false" },
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
