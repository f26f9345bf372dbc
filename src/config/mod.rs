//! Configuration management

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::moderation::{ModerationMode, UiSettings};

const DEFAULT_CONFIG_FILE: &str = "showcase";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the content backend the API paths are forwarded to
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Deadline for forwarded requests
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub moderation_mode: ModerationMode,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Backend URL with a trailing slash so relative joins keep its path
    pub fn backend_origin(&self) -> Result<Url> {
        let mut raw = self.backend_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).with_context(|| format!("invalid backend_url {:?}", self.backend_url))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn ui_settings(&self) -> UiSettings {
        UiSettings {
            moderation_mode: self.moderation_mode,
        }
    }
}

pub fn load_config() -> Result<Config> {
    let config_file =
        std::env::var("SHOWCASE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

    let config = ::config::Config::builder()
        // Start with defaults
        .set_default("backend_url", default_backend_url())?
        .set_default("request_timeout_secs", default_request_timeout_secs())?
        .set_default("moderation_mode", "optimistic")?
        // Load from config file if it exists
        .add_source(::config::File::with_name(&config_file).required(false))
        // Override with environment variables (SHOWCASE_BACKEND_URL, SHOWCASE_MODERATION_MODE, etc.)
        .add_source(
            ::config::Environment::with_prefix("SHOWCASE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = config.try_deserialize()?;
    // Fail at startup rather than on the first forwarded request
    config.backend_origin()?;
    Ok(config)
}
