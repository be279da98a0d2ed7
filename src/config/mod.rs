//! Configuration for the history viewer
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/pathtrail/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::history::{EventRowFormatter, HistoryTableBuilder, IconMap, DEFAULT_MAX_WIDTH};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

mod logging;

#[cfg(test)]
mod tests;

pub use logging::{LogRotation, LoggingConfig};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_THEME: &str = "auto";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Character budget for the path header and the details column
    pub max_width: usize,

    /// Theme name: "auto", "mono"
    pub theme: String,

    /// Icon overrides keyed by event kind (plus "default" and "failure")
    pub icons: BTreeMap<String, String>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            theme: DEFAULT_THEME.to_string(),
            icons: BTreeMap::new(),
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
    pub max_width: Option<usize>,
    pub theme: Option<String>,

    /// Optional [icons] section
    pub icons: Option<BTreeMap<String, String>>,

    /// Optional [logging] section
    pub logging: Option<LoggingConfig>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/pathtrail/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("pathtrail").join("config.toml"))
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error: silently falling back would hide the typo.
    fn load_file_config() -> anyhow::Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read config file {}", path.display())),
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed config file with environment lookups
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Width: env > file > default (zero would hide everything)
        let max_width = env("PATHTRAIL_MAX_WIDTH")
            .and_then(|v| v.trim().parse().ok())
            .or(file.max_width)
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_MAX_WIDTH);

        // Theme: env > file > default
        let theme = env("PATHTRAIL_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Icons: file only
        let icons = file.icons.unwrap_or_default();

        // Logging: file, with level overridable from env
        let mut logging = file.logging.unwrap_or_default();
        if let Some(level) = env("PATHTRAIL_LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            max_width,
            theme,
            icons,
            logging,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline construction
    // ─────────────────────────────────────────────────────────────────────────

    pub fn icon_map(&self) -> IconMap {
        IconMap::with_overrides(&self.icons)
    }

    pub fn row_formatter(&self) -> EventRowFormatter {
        EventRowFormatter::new(self.icon_map(), self.max_width)
    }

    pub fn table_builder(&self) -> HistoryTableBuilder {
        HistoryTableBuilder::new(self.row_formatter())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Serialization
    // ─────────────────────────────────────────────────────────────────────────

    /// Serialize icon overrides as the [icons] section body
    fn icons_to_toml(&self) -> anyhow::Result<String> {
        if self.icons.is_empty() {
            // Show example comments when nothing is overridden
            return Ok(r#"# read = "📖"
# mmap = "🧠"
# default = "❔"    # unknown event kinds
# failure = "❌"    # any failed event
"#
            .to_string());
        }
        toml::to_string(&self.icons).context("Failed to serialize icon overrides")
    }

    /// Effective configuration as a config file
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(format!(
            r#"# pathtrail configuration

# Character budget for the path header and the details column
max_width = {max_width}

# Theme: auto, mono
theme = {theme}

# Event icons (keys are event kinds, case-insensitive)
[icons]
{icons}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = {log_file_rotation}  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            max_width = self.max_width,
            theme = toml_literal(&self.theme)?,
            icons = self.icons_to_toml()?,
            log_level = toml_literal(&self.logging.level)?,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_literal(&self.logging.file_dir)?,
            log_file_rotation = toml_literal(&self.logging.file_rotation)?,
            log_file_prefix = toml_literal(&self.logging.file_prefix)?,
        ))
    }
}

/// A single value as TOML source, quoted and escaped
fn toml_literal<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let value = toml::Value::try_from(value).context("Value cannot be written as TOML")?;
    Ok(value.to_string())
}
