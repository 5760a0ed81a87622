//! TOML configuration for the `keysynth` CLI.
//!
//! Read from an explicit `--config` path or from the platform config file:
//! - Windows:  `%APPDATA%\Keysynth\config.toml`
//! - Linux:    `~/.config/keysynth/config.toml`
//! - macOS:    `~/Library/Application Support/Keysynth/config.toml`
//!
//! ```toml
//! [paste]
//! batch_size = 10
//! batch_delay_ms = 5
//!
//! [gesture]
//! drag_delta = 64
//! drag_margin = 64
//! vertical_tolerance = 10
//!
//! [logging]
//! log_level = "info"
//! ```
//!
//! Every field has a serde default, so a missing file, a missing section or a
//! missing key all fall back to the values above.

use std::path::{Path, PathBuf};
use std::time::Duration;

use keysynth_core::GestureThresholds;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::dispatch_keys::{DispatchConfig, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub paste: PasteConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Paste rate limiting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasteConfig {
    /// Key events per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Pause between batches, in milliseconds.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

/// Swipe thresholds, in gesture units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    #[serde(default = "default_drag_delta")]
    pub drag_delta: f64,
    #[serde(default = "default_drag_margin")]
    pub drag_margin: f64,
    #[serde(default = "default_vertical_tolerance")]
    pub vertical_tolerance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}
fn default_batch_delay_ms() -> u64 {
    DEFAULT_BATCH_DELAY.as_millis() as u64
}
fn default_drag_delta() -> f64 {
    GestureThresholds::default().drag_delta
}
fn default_drag_margin() -> f64 {
    GestureThresholds::default().drag_margin
}
fn default_vertical_tolerance() -> f64 {
    GestureThresholds::default().vertical_tolerance
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_delta: default_drag_delta(),
            drag_margin: default_drag_margin(),
            vertical_tolerance: default_vertical_tolerance(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl PasteConfig {
    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            batch_size: self.batch_size,
            batch_delay: Duration::from_millis(self.batch_delay_ms),
        }
    }
}

impl GestureConfig {
    pub fn thresholds(&self) -> GestureThresholds {
        GestureThresholds {
            drag_delta: self.drag_delta,
            drag_margin: self.drag_margin,
            vertical_tolerance: self.vertical_tolerance,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Resolves the full path to the platform config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads `AppConfig` from `path`, returning defaults if the file does not
/// exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Loads `AppConfig` from `path`, or from the platform config file when
/// `path` is `None`.
///
/// A missing platform config directory is not an error; defaults are used.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config_from(path),
        None => match config_file_path() {
            Ok(path) => load_config_from(&path),
            Err(ConfigError::NoPlatformConfigDir) => Ok(AppConfig::default()),
            Err(e) => Err(e),
        },
    }
}

/// Renders `config` as TOML.
///
/// # Errors
///
/// Returns [`ConfigError::Serialize`] if serialization fails.
pub fn render_config(config: &AppConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Resolves the platform config directory, including the `keysynth` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Keysynth"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("keysynth"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Keysynth")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
