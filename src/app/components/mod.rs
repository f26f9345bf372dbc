//! Shared UI components for the Dioxus fullstack web UI.

pub mod asset_card;
pub mod layout;
pub mod nav;

pub use asset_card::{AssetGrid, AssetPreview};
pub use layout::Layout;
pub use nav::Nav;
