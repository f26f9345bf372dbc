//! Content Showcase
//!
//! Browser front end for a content moderation and display backend.
//!
//! This library provides:
//! - Public gallery of live uploads and the moderation queue
//! - Per-room "recently shown" history
//! - Single-asset moderation view
//! - Unattended kiosk slideshow with shuffled rotation and self-reload
//! - Web UI (Dioxus fullstack, Pico CSS)

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app (shared between server SSR and WASM client)
pub mod app;

// Shared logic (compiled for both targets)
pub mod error;
pub mod model;
pub mod moderation;
pub mod rotation;
pub mod slideshow;
pub mod timer;

// Server-only modules (excluded from WASM build)
#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;
