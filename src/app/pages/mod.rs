//! Dioxus fullstack page components.
//!
//! Pages fetch through [`crate::app::api`] and keep whatever they last
//! fetched when a request fails.

mod gallery;
mod last;
mod moderate;
mod slideshow;

pub use gallery::Gallery;
pub use last::Last;
pub use moderate::Moderate;
pub use slideshow::Slideshow;
