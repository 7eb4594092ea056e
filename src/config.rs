// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling

use crate::constants::DEFAULT_SETTLE_DELAY_MS;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Configuration data that persists between application runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pause in milliseconds between showing the blackout cover and
    /// triggering the sensor capture
    pub settle_delay_ms: u64,
    /// Fire a haptic pulse after a successful capture
    pub haptics_enabled: bool,
    /// Override for the media library directory (defaults to the system
    /// pictures directory)
    pub library_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            haptics_enabled: true,
            library_dir: None,
        }
    }
}

impl AppConfig {
    /// Path of the configuration file, if a config directory exists
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("snapcam").join("config.json"))
    }

    /// Load the configuration, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Configuration loaded");
                    config
                }
                Err(err) => {
                    warn!(error = %err, "Malformed configuration, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the configuration as pretty-printed JSON
    pub fn save(&self) -> AppResult<()> {
        let Some(path) = Self::config_path() else {
            return Err(AppError::Config("no config directory available".into()));
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Config(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(&path, json).map_err(|e| AppError::Config(e.to_string()))?;
        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }
}
