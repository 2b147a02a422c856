//! Failures reading, writing and checking the planner settings file.

use std::io;
use thiserror::Error;

/// Why a settings file could not be used.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Reading the settings file failed; carries the path and cause.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// Writing the settings file failed; carries the path and cause.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// A key parsed but its value cannot be used, e.g. an empty `storage.data_dir`.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// No platform config directory, or its parent could not be created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Malformed `.json` settings.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed `.toml` settings.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// The settings parsed but a layout value is unusable.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Rejections from [`Config::validate`](crate::Config::validate) and the
/// extension check.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Extension other than `.toml` or `.json`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A grid step, gutter or zoom bound outside its usable range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },
}

impl ConfigError {
    pub(crate) fn out_of_range(key: &str, value: impl ToString) -> Self {
        Self::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_messages_name_key_and_path() {
        let err = SettingsError::LoadError("/home/k/.config/kitchenkit/config.toml: denied".into());
        assert_eq!(
            err.to_string(),
            "Failed to load settings: /home/k/.config/kitchenkit/config.toml: denied"
        );

        let err = SettingsError::InvalidSetting {
            key: "storage.data_dir".to_string(),
            reason: "must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'storage.data_dir': must not be empty"
        );
    }

    #[test]
    fn test_zoom_and_grid_rejections() {
        let err = ConfigError::out_of_range("layout.grid_step", 0);
        assert_eq!(err.to_string(), "Value out of range for 'layout.grid_step': 0");

        let err = ConfigError::out_of_range("layout.min_zoom", -0.5);
        assert_eq!(err.to_string(), "Value out of range for 'layout.min_zoom': -0.5");

        let err = ConfigError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");
    }

    #[test]
    fn test_layout_rejection_wraps_into_settings_error() {
        let err: SettingsError = ConfigError::out_of_range("layout.zoom_step", 0).into();
        assert_eq!(
            err.to_string(),
            "Config error: Value out of range for 'layout.zoom_step': 0"
        );

        let err: SettingsError = toml::from_str::<toml::Value>("[layout").unwrap_err().into();
        assert!(matches!(err, SettingsError::TomlError(_)));
    }
}
