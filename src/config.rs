//! Configuration file support for imgnode.
//!
//! Sizing constants live here rather than in code so hosts can tune them
//! per deployment. The file is JSON and versioned.

use std::path::Path;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::constants::{EDITOR_SURFACE_MARKER, INITIAL_WIDTH_FRACTION, MIN_SIZE};

/// Log level setting for the demo binary and hosts that embed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
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

/// Sizing and interaction settings for image nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Smallest width an image can be sized or dragged to, in pixels
    #[serde(default = "default_min_size")]
    pub min_size: f64,

    /// Share of the editor surface width given to a freshly inserted image
    #[serde(default = "default_initial_width_fraction")]
    pub initial_width_fraction: f64,

    /// Largest width a drag can reach. Unbounded when absent.
    #[serde(default)]
    pub max_width: Option<f64>,

    /// Marker of the element whose width seeds the initial size
    #[serde(default = "default_container_marker")]
    pub container_marker: String,

    /// Minimum spacing between applied drag moves, 0 applies every move
    #[serde(default)]
    pub move_frame_interval_ms: u64,

    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_min_size() -> f64 {
    MIN_SIZE
}

fn default_initial_width_fraction() -> f64 {
    INITIAL_WIDTH_FRACTION
}

fn default_container_marker() -> String {
    EDITOR_SURFACE_MARKER.to_string()
}

impl ResizeConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            min_size: default_min_size(),
            initial_width_fraction: default_initial_width_fraction(),
            max_width: None,
            container_marker: default_container_marker(),
            move_frame_interval_ms: 0,
            log_level: LogLevel::default(),
        }
    }

    /// Set the drag width ceiling.
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Set the drag move spacing.
    pub fn with_move_frame_interval(mut self, millis: u64) -> Self {
        self.move_frame_interval_ms = millis;
        self
    }

    pub fn move_frame_interval(&self) -> Duration {
        Duration::from_millis(self.move_frame_interval_ms)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_size.is_finite() && self.min_size > 0.0) {
            return Err(ConfigError::invalid("min_size", self.min_size));
        }
        if !(self.initial_width_fraction > 0.0 && self.initial_width_fraction <= 1.0) {
            return Err(ConfigError::invalid(
                "initial_width_fraction",
                self.initial_width_fraction,
            ));
        }
        if let Some(max) = self.max_width {
            if !(max.is_finite() && max >= self.min_size) {
                return Err(ConfigError::invalid("max_width", max));
            }
        }
        if self.container_marker.trim().is_empty() {
            return Err(ConfigError::invalid("container_marker", "<empty>"));
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

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        config.validate()?;

        Ok(config)
    }

    /// Read configuration from a file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Get the default filename for the configuration file.
    pub fn default_filename() -> &'static str {
        "imgnode-config.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("imgnode").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home| {
                home.join(".config")
                    .join("imgnode")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A setting holds an unusable value
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}
