//! Configuration file handling for the planner.
//!
//! Configuration is organized into logical sections:
//! - Layout settings (grid step, ruler labels, gutters, zoom range)
//! - Pricing defaults (tier used until the user picks one)
//! - Storage settings (directory holding the persisted layouts)
//!
//! Files may be JSON or TOML, chosen by extension. Missing sections and keys
//! take their defaults.

use kitchenkit_core::constants::{
    AXIS_MARGIN, BOTTOM_MARGIN, GRID_STEP, LABEL_STEP, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
use kitchenkit_core::QualityTier;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const APP_DIR: &str = "kitchenkit";
const CONFIG_FILE: &str = "config.toml";

/// Wall canvas tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Grid and free-slot search step (cm)
    pub grid_step: i32,
    /// Ruler label step (cm)
    pub label_step: i32,
    /// Left gutter holding the vertical ruler (px, unscaled)
    pub axis_margin: f64,
    /// Bottom gutter holding the horizontal ruler (px, unscaled)
    pub bottom_margin: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            grid_step: GRID_STEP,
            label_step: LABEL_STEP,
            axis_margin: AXIS_MARGIN,
            bottom_margin: BOTTOM_MARGIN,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }
}

/// Pricing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PricingSettings {
    /// Tier used when none has been stored yet
    pub default_tier: QualityTier,
}

/// Where layouts are persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory of the key-value store
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutSettings,
    pub pricing: PricingSettings,
    pub storage: StorageSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file: `<config dir>/kitchenkit/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        config.data_dir()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Directory of the layout store.
    ///
    /// Rejects an empty path and a path naming an existing regular file.
    pub fn data_dir(&self) -> SettingsResult<&Path> {
        let dir = self.storage.data_dir.as_path();
        let reason = if dir.as_os_str().is_empty() {
            "must not be empty".to_string()
        } else if dir.is_file() {
            format!("{} is a file", dir.display())
        } else {
            return Ok(dir);
        };
        Err(SettingsError::InvalidSetting {
            key: "storage.data_dir".to_string(),
            reason,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;

        if layout.grid_step <= 0 {
            return Err(ConfigError::out_of_range("layout.grid_step", layout.grid_step));
        }
        if layout.label_step <= 0 {
            return Err(ConfigError::out_of_range("layout.label_step", layout.label_step));
        }

        if !(layout.axis_margin.is_finite() && layout.axis_margin >= 0.0) {
            return Err(ConfigError::out_of_range("layout.axis_margin", layout.axis_margin));
        }
        if !(layout.bottom_margin.is_finite() && layout.bottom_margin >= 0.0) {
            return Err(ConfigError::out_of_range("layout.bottom_margin", layout.bottom_margin));
        }

        // zoom range must be positive and ordered
        if !(layout.min_zoom.is_finite() && layout.min_zoom > 0.0) {
            return Err(ConfigError::out_of_range("layout.min_zoom", layout.min_zoom));
        }
        if !(layout.max_zoom.is_finite() && layout.max_zoom >= layout.min_zoom) {
            return Err(ConfigError::out_of_range("layout.max_zoom", layout.max_zoom));
        }
        if !(layout.zoom_step.is_finite() && layout.zoom_step > 0.0) {
            return Err(ConfigError::out_of_range("layout.zoom_step", layout.zoom_step));
        }

        Ok(())
    }
}
