//! Application settings management
//!
//! Settings are stored in `{config_dir}/sharn-atlas/settings.json`. A missing or
//! unreadable file means defaults.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use sharn_core::store::DEFAULT_DATASET;
use std::fs;
use std::path::{Path, PathBuf};

/// Application settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dataset loaded when the startup location names none
    pub default_dataset: String,
    /// SVG map whose `.districts > path` elements are the clickable regions
    pub map_path: PathBuf,
    /// Whether to reopen the last selected district on startup
    pub restore_last_district: bool,
    /// Last selected district (only kept when restoring is enabled)
    pub last_district: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_dataset: DEFAULT_DATASET.to_string(),
            map_path: PathBuf::from("sharn.svg"),
            restore_last_district: true,
            last_district: None,
        }
    }
}

impl Settings {
    /// Record the selected district if restoring is enabled.
    /// Returns whether anything changed.
    pub fn remember_district(&mut self, district: Option<&str>) -> bool {
        if !self.restore_last_district || self.last_district.as_deref() == district {
            return false;
        }
        self.last_district = district.map(str::to_string);
        true
    }
}

/// Get the path to the settings file
fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sharn-atlas").join("settings.json"))
}

/// Load settings from disk, returning defaults if file doesn't exist or is invalid
pub fn load_settings() -> Settings {
    settings_path().map_or_else(Settings::default, |path| load_from(&path))
}

fn load_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => Settings::default(),
    }
}

/// Save settings to disk
pub fn save_settings(settings: &Settings) -> Result<()> {
    let Some(path) = settings_path() else {
        bail!("Could not determine config directory");
    };
    save_to(settings, &path)
}

fn save_to(settings: &Settings, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, json).context("Failed to write settings file")
}
