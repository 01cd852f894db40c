//! Editor configuration.
//!
//! Settings are stored as JSON. Every field has a default, so a partial file
//! (or an empty object) is a valid configuration.

use crate::error::{Error, Result};
use crate::model::BoxKind;
use serde::{Deserialize, Serialize};
use sheetmark_geom::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};
use std::path::Path;

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Minimum width and height, in screen pixels, for a drawn box to be kept.
pub const DEFAULT_MIN_BOX_SIZE: f64 = 5.0;

/// Hit radius of the corner handles, in screen pixels.
pub const DEFAULT_HANDLE_RADIUS: f64 = 6.0;

/// Multiplicative zoom step for zoom in/out.
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;

/// Log level setting.
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

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Lower zoom bound
    pub min_scale: f64,
    /// Upper zoom bound
    pub max_scale: f64,
    /// Scale applied when a document is loaded
    pub initial_scale: f64,
    /// Factor for one zoom in/out step
    pub zoom_step: f64,
    /// Pixels kept free around the page when fitting
    pub fit_padding: f64,

    /// Drawn boxes must exceed this in both dimensions (screen pixels)
    pub min_box_size: f64,
    /// Corner handle hit radius (screen pixels)
    pub handle_radius: f64,

    /// Kind given to newly drawn boxes
    pub default_kind: BoxKind,

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            initial_scale: 1.0,
            zoom_step: DEFAULT_ZOOM_STEP,
            fit_padding: 0.0,
            min_box_size: DEFAULT_MIN_BOX_SIZE,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            default_kind: BoxKind::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl EditorConfig {
    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(Error::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the numeric settings can work together.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.min_scale,
            self.max_scale,
            self.initial_scale,
            self.zoom_step,
            self.fit_padding,
            self.min_box_size,
            self.handle_radius,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::invalid_config("values must be finite numbers"));
        }
        if self.min_scale <= 0.0 {
            return Err(Error::invalid_config(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if self.min_scale > self.max_scale {
            return Err(Error::invalid_config(format!(
                "min_scale {} exceeds max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if self.zoom_step <= 1.0 {
            return Err(Error::invalid_config(format!(
                "zoom_step must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        if self.min_box_size < 0.0 || self.handle_radius < 0.0 || self.fit_padding < 0.0 {
            return Err(Error::invalid_config(
                "min_box_size, handle_radius and fit_padding must not be negative",
            ));
        }
        Ok(())
    }

    /// Read configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "sheetmark-config.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("sheetmark").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("sheetmark")
                    .join(Self::default_filename())
            })
        }
    }

    /// Read configuration from `path` if the file exists.
    ///
    /// A missing file is `Ok(None)`; a file that is present but unreadable or
    /// invalid is an error.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Load configuration from the default path, if there is one.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Result<Option<Self>> {
        match Self::default_path() {
            Some(path) => Self::load_if_exists(&path),
            None => Ok(None),
        }
    }
}
