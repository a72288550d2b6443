//! TOML-based application configuration.
//!
//! Stores the tunables for the engagement trigger engine and the
//! interstitial gate:
//! - Prompt cooldown window and welcome-offer duration
//! - Tree-size trigger threshold and interval
//! - Interstitial interval, navigation-event threshold and preload retry
//!
//! Configuration is stored at `~/.config/aila/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Engagement trigger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementConfig {
    /// Minimum hours between non-exempt prompts.
    #[serde(default = "default_cooldown_hours")]
    pub prompt_cooldown_hours: i64,
    /// Lifetime of the new-user welcome offer, in hours.
    #[serde(default = "default_welcome_hours")]
    pub welcome_offer_hours: i64,
    /// A tree-size prompt fires every this many persons added...
    #[serde(default = "default_tree_interval")]
    pub tree_size_interval: u64,
    /// ...once the tree has at least this many persons.
    #[serde(default = "default_tree_min")]
    pub tree_size_min: u64,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            prompt_cooldown_hours: default_cooldown_hours(),
            welcome_offer_hours: default_welcome_hours(),
            tree_size_interval: default_tree_interval(),
            tree_size_min: default_tree_min(),
        }
    }
}

/// Interstitial gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdGateConfig {
    /// Minimum seconds between two interstitial displays.
    #[serde(default = "default_min_interval")]
    pub min_interval_secs: i64,
    /// Navigation events required before an interstitial may show.
    #[serde(default = "default_page_changes")]
    pub page_changes_before_ad: u32,
    /// Fixed delay before re-attempting a preload, in seconds.
    #[serde(default = "default_retry_delay")]
    pub preload_retry_secs: i64,
}

impl Default for AdGateConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: default_min_interval(),
            page_changes_before_ad: default_page_changes(),
            preload_retry_secs: default_retry_delay(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/aila/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engagement: EngagementConfig,
    #[serde(default)]
    pub ads: AdGateConfig,
}

// Default functions
fn default_cooldown_hours() -> i64 {
    24
}
fn default_welcome_hours() -> i64 {
    24
}
fn default_tree_interval() -> u64 {
    5
}
fn default_tree_min() -> u64 {
    10
}
fn default_min_interval() -> i64 {
    60
}
fn default_page_changes() -> u32 {
    3
}
fn default_retry_delay() -> i64 {
    5
}

impl Config {
    /// Path to the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        let path = match Self::path() {
            Ok(p) => p,
            Err(_) => return Self::default(),
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                log::warn!("config parse failed, using defaults: {e}");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.engagement.prompt_cooldown_hours, 24);
        assert_eq!(config.engagement.tree_size_min, 10);
        assert_eq!(config.ads.min_interval_secs, 60);
        assert_eq!(config.ads.page_changes_before_ad, 3);
        assert_eq!(config.ads.preload_retry_secs, 5);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [ads]
            min_interval_secs = 120
            "#,
        )
        .unwrap();
        assert_eq!(config.ads.min_interval_secs, 120);
        assert_eq!(config.ads.page_changes_before_ad, 3);
        assert_eq!(config.engagement.prompt_cooldown_hours, 24);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let s = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.engagement.tree_size_interval, config.engagement.tree_size_interval);
    }
}
