//! Configuration file support for the color picker.
//!
//! A picker is configured from a small JSON document. Every field is
//! optional and falls back to the picker's defaults.

use std::path::Path;
use std::time::Duration;

use colorpick_model::ColorFormat;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_QUIET_PERIOD, DEFAULT_SIZE};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Picker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Surface size in logical units (scaled by `UNIT_PIXEL`)
    pub size: f64,

    /// Encoding of published values
    pub output_format: ColorFormat,

    /// Quiet period of the emission timer, in milliseconds
    pub quiet_period_ms: u64,

    /// Log verbosity level
    pub log_level: LogLevel,

    /// Color string loaded when the picker starts
    pub initial_value: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            size: DEFAULT_SIZE,
            output_format: ColorFormat::default(),
            quiet_period_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
            log_level: LogLevel::default(),
            initial_value: None,
        }
    }
}

impl PickerConfig {
    /// Quiet period as a [`Duration`].
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// Check values that serde accepts but the picker cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                file_version: self.version,
                supported_version: CONFIG_VERSION,
            });
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "size",
                message: format!("must be a positive number, got {}", self.size),
            });
        }
        if self.quiet_period_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "quiet_period_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a JSON file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is not the one this build understands
    #[error(
        "Configuration file version {file_version} is not supported (expected {supported_version})"
    )]
    UnsupportedVersion {
        /// Version found in the file
        file_version: u32,
        /// Version this build reads
        supported_version: u32,
    },

    /// A field has a value the picker cannot use
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.size, 22.0);
        assert_eq!(config.output_format, ColorFormat::Hex);
        assert_eq!(config.quiet_period(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = PickerConfig::from_json(r#"{ "output_format": "rgb" }"#).unwrap();
        assert_eq!(config.output_format, ColorFormat::Rgb);
        assert_eq!(config.size, 22.0);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.initial_value, None);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PickerConfig {
            size: 30.0,
            output_format: ColorFormat::Rgb,
            quiet_period_ms: 120,
            log_level: LogLevel::Debug,
            initial_value: Some("#336699".to_string()),
            ..PickerConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(PickerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_other_versions() {
        let err = PickerConfig::from_json(r#"{ "version": 2 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedVersion {
                file_version: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            PickerConfig::from_json(r#"{ "size": 0 }"#),
            Err(ConfigError::InvalidValue { field: "size", .. })
        ));
        assert!(matches!(
            PickerConfig::from_json(r#"{ "quiet_period_ms": 0 }"#),
            Err(ConfigError::InvalidValue {
                field: "quiet_period_ms",
                ..
            })
        ));
        assert!(matches!(
            PickerConfig::from_json(r#"{ "output_format": "cmyk" }"#),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
        assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("colorpick-config-{}", std::process::id()));
        let path = dir.join("nested").join("picker.json");
        let config = PickerConfig {
            size: 12.5,
            ..PickerConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(PickerConfig::load(&path).unwrap(), config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("colorpick-does-not-exist.json");
        assert!(matches!(
            PickerConfig::load(path),
            Err(ConfigError::IoError(_))
        ));
    }
}
