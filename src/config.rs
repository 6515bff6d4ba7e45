//! Configuration management for Digitalflix
//!
//! Handles config file loading/saving and API endpoint resolution.
//! Config is stored at ~/.config/digitalflix/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::catalog::DEFAULT_BASE_URL;
use crate::player::playback::{DEFAULT_IDLE_HIDE, DEFAULT_TOTAL_SECS};

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "DIGITALFLIX_API_URL";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API root (e.g. http://localhost:3000/api)
    pub api_base_url: Option<String>,
    /// Keep watch controls on screen instead of hiding them when idle.
    /// Also selects the embed variant with native YouTube controls.
    pub controls_visible_on_idle: bool,
    /// Runtime of the simulated watch session in seconds
    pub watch_duration_secs: u32,
    /// Seconds of inactivity before watch controls are hidden
    pub idle_hide_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            controls_visible_on_idle: false,
            watch_duration_secs: DEFAULT_TOTAL_SECS,
            idle_hide_secs: DEFAULT_IDLE_HIDE.as_secs(),
        }
    }
}

impl Config {
    /// Get config file path (~/.config/digitalflix/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("digitalflix").join("config.toml"))
    }

    /// Load config from the default location, or defaults if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from a specific file, or defaults if unreadable
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("Could not determine config path")?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Resolve the API base URL with fallback chain:
    /// 1. Environment variable DIGITALFLIX_API_URL
    /// 2. `api_base_url` from the config file
    /// 3. The local default
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Idle period before controls hide, or None when they stay visible
    pub fn idle_hide_after(&self) -> Option<Duration> {
        if self.controls_visible_on_idle {
            None
        } else {
            Some(Duration::from_secs(self.idle_hide_secs))
        }
    }
}
