//! Dioxus fullstack application entry point.
//!
//! This module provides the main App component that serves as the root
//! of the Dioxus application with client-side hydration.

use dioxus::prelude::*;

pub mod api;
pub mod components;
pub mod media;
pub mod pages;

use pages::{Gallery, Last, Moderate, Slideshow};

/// Root app component with routing
#[component]
pub fn App() -> Element {
    rsx! {
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Gallery {},
    #[route("/last")]
    Last {},
    #[route("/moderate/:id")]
    Moderate { id: u64 },
    #[route("/slideshow")]
    Slideshow {},
}
