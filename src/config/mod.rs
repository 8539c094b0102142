//! Configuration for the gallery binary
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/canoe-ui/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::components::ToastPosition;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;


pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under ~/.config
const APP_DIR: &str = "canoe-ui";

// ─────────────────────────────────────────────────────────────────────────────
// Theme
// ─────────────────────────────────────────────────────────────────────────────

/// Gallery colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    /// Parse theme name, falling back to dark for unknown values
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// Defaults for toasts raised by the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct ToastSettings {
    /// Auto-dismiss delay; zero keeps toasts until dismissed
    pub duration: Duration,
    pub position: ToastPosition,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(4000),
            position: ToastPosition::TopRight,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileToast {
    pub duration_ms: Option<u64>,
    pub position: Option<ToastPosition>,
}

impl ToastSettings {
    fn from_file(file: Option<FileToast>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            duration: file
                .duration_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.duration),
            position: file.position.unwrap_or(defaults.position),
        }
    }
}

/// Log view settings
#[derive(Debug, Clone, PartialEq)]
pub struct LogViewSettings {
    pub auto_scroll: bool,
}

impl Default for LogViewSettings {
    fn default() -> Self {
        Self { auto_scroll: true }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLogView {
    pub auto_scroll: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Colour scheme for the gallery
    pub theme: ThemeName,

    /// Interval between timer ticks in the gallery loop
    pub tick_rate: Duration,

    /// Toast defaults
    pub toast: ToastSettings,

    /// Log view settings
    pub log: LogViewSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::Dark,
            tick_rate: Duration::from_millis(100),
            toast: ToastSettings::default(),
            log: LogViewSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub tick_rate_ms: Option<u64>,

    /// Optional [toast] section
    pub toast: Option<FileToast>,

    /// Optional [log] section
    pub log: Option<FileLogView>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/canoe-ui/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_DIR).join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Overwrite the config file with defaults
    pub fn reset_file() -> Result<PathBuf> {
        let path = Self::config_path().context("could not determine home directory")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, Self::default().to_toml())
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Load file config if it exists
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail with a clear message rather than silently fall
    /// back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents)
                .with_context(|| format!("failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("cannot read config file {}", path.display()))
            }
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge file values and environment lookups over the defaults
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Theme: env > file > default
        let theme = env("CANOE_UI_THEME")
            .or(file.theme)
            .map(|s| ThemeName::parse(&s))
            .unwrap_or(defaults.theme);

        // Tick rate: env > file > default; zero would spin the loop
        let tick_rate = env("CANOE_UI_TICK_RATE_MS")
            .and_then(|v| v.parse().ok())
            .or(file.tick_rate_ms)
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick_rate);

        let mut toast = ToastSettings::from_file(file.toast);
        if let Some(ms) = env("CANOE_UI_TOAST_DURATION_MS").and_then(|v| v.parse().ok()) {
            toast.duration = Duration::from_millis(ms);
        }

        let log = LogViewSettings {
            auto_scroll: file
                .log
                .and_then(|l| l.auto_scroll)
                .unwrap_or(defaults.log.auto_scroll),
        };

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env("CANOE_UI_LOG_LEVEL") {
            logging.level = level;
        }
        if let Some(dir) = env("CANOE_UI_LOG_DIR") {
            logging.file_dir = PathBuf::from(dir);
        }

        Self {
            theme,
            tick_rate,
            toast,
            log,
            logging,
        }
    }
}
