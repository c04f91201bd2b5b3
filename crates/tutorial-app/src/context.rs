//! # Application Context
//!
//! The user settings every screen may read (theme, notification preference) live in one
//! [`AppContext`] built at startup and passed down explicitly. It is a cheap clone around
//! a shared [`Observable`], so a screen can read the settings synchronously or watch them.

use resource_framework::{Observable, Watcher};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

/// User-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications_enabled: true,
        }
    }
}

/// Shared, observable application settings.
#[derive(Debug, Clone)]
pub struct AppContext {
    settings: Arc<Observable<Settings>>,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(Observable::new(settings)),
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings.get()
    }

    pub fn watch_settings(&self) -> Watcher<Settings> {
        self.settings.subscribe()
    }

    pub fn set_theme(&self, theme: Theme) {
        info!(?theme, "Theme changed");
        self.settings.update(|current| Settings {
            theme,
            ..current.clone()
        });
    }

    pub fn set_notifications_enabled(&self, enabled: bool) {
        info!(enabled, "Notification preference changed");
        self.settings.update(|current| Settings {
            notifications_enabled: enabled,
            ..current.clone()
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_settings() {
        let context = AppContext::default();
        let other = context.clone();
        let mut watcher = other.watch_settings();

        context.set_theme(Theme::Dark);
        watcher.changed().await.unwrap();
        assert_eq!(watcher.borrow().theme, Theme::Dark);
        assert_eq!(other.settings().theme, Theme::Dark);
        assert!(other.settings().notifications_enabled);
    }
}
