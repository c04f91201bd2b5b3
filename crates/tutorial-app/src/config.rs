//! # Application Configuration
//!
//! [`AppConfig`] is read from TOML. Every field has a default, so an empty file (or no
//! file at all) gives a working in-memory setup.
//!
//! ```toml
//! channel_capacity = 64
//! race_policy = "latest_call"
//! eager_notifications = true
//!
//! [backend]
//! kind = "http"
//! base_url = "http://localhost:8080/api"
//! timeout_secs = 10
//!
//! [settings]
//! theme = "dark"
//! notifications_enabled = false
//! ```

use crate::context::Settings;
use resource_framework::{RacePolicy, ViewModelOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Environment variable naming an optional configuration file.
pub const CONFIG_ENV: &str = "TUTORIAL_APP_CONFIG";

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Where the records live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// One in-process document store per entity.
    InMemory,
    /// A JSON REST backend.
    Http {
        base_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::InMemory
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    /// Capacity of every request channel (stores and view-models).
    pub channel_capacity: usize,
    pub race_policy: RacePolicy,
    /// Load the notification inbox as soon as the app starts.
    pub eager_notifications: bool,
    /// Initial user settings.
    pub settings: Settings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            channel_capacity: 32,
            race_policy: RacePolicy::default(),
            eager_notifications: true,
            settings: Settings::default(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// The file named by `TUTORIAL_APP_CONFIG`, or the defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load(path),
            Err(_) => {
                info!("{} not set, using default config", CONFIG_ENV);
                Ok(Self::default())
            }
        }
    }

    /// View-model options for a screen.
    pub fn view_model_options(&self, eager: bool) -> ViewModelOptions {
        ViewModelOptions {
            capacity: self.channel_capacity,
            eager,
            race_policy: self.race_policy,
            reload_list: true,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be at least 1".into(),
            ));
        }
        if let BackendConfig::Http { base_url, .. } = &self.backend {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "base_url must be an http(s) URL, got {:?}",
                    base_url
                )));
            }
        }
        Ok(())
    }
}
