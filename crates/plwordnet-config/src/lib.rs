//! plwordnet Configuration Management
//!
//! Provides configuration loading with support for:
//! - Global config: `~/.plwordnet/config.toml`
//! - Local config: `.plwordnet/config.toml` (in workspace)
//! - CLI overrides via `ConfigOverrides`
//!
//! Configuration is merged in order: global → local → CLI overrides.

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Level used when no layer sets `logging.level`.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root configuration for plwordnet.
///
/// Represents the fully merged configuration from all sources.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WordnetConfig {
    /// Where the wordnet is loaded from
    pub source: SourceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Wordnet source locations.
///
/// # Example TOML
///
/// ```toml
/// [source]
/// path = "data/plwordnet-4.2.xml.gz"
/// snapshot = "data/plwordnet.snap"
/// prefer_snapshot = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    /// XML dump (plain or `.gz`), or a snapshot file
    pub path: Option<PathBuf>,

    /// Snapshot written by `plwordnet dump`
    pub snapshot: Option<PathBuf>,

    /// Load the snapshot instead of `path` when it exists
    pub prefer_snapshot: Option<bool>,
}

impl SourceConfig {
    pub fn prefers_snapshot(&self) -> bool {
        self.prefer_snapshot.unwrap_or(false)
    }
}

/// Logging configuration.
///
/// Both fields stay unset until some layer sets them, so a partial local
/// file never resets what the global file chose.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format (text, json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<LogFormat>,
}

impl LoggingConfig {
    /// Every field set to its default value.
    pub fn defaults() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_string()),
            format: Some(LogFormat::default()),
        }
    }

    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn format(&self) -> LogFormat {
        self.format.unwrap_or_default()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON structured logging
    Json,
}

/// CLI overrides for configuration values.
///
/// Used to apply command-line arguments over file-based config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override the source path
    pub source: Option<PathBuf>,

    /// Override the snapshot path
    pub snapshot: Option<PathBuf>,

    /// Override snapshot preference
    pub prefer_snapshot: Option<bool>,

    /// Override log level
    pub log_level: Option<String>,
}

impl WordnetConfig {
    /// Apply CLI overrides to this configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref path) = overrides.source {
            self.source.path = Some(path.clone());
        }

        if let Some(ref path) = overrides.snapshot {
            self.source.snapshot = Some(path.clone());
        }

        if let Some(prefer) = overrides.prefer_snapshot {
            self.source.prefer_snapshot = Some(prefer);
        }

        if let Some(ref level) = overrides.log_level {
            self.logging.level = Some(level.clone());
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid(
                "logging.level",
                format!(
                    "unknown level '{}', expected one of {}",
                    self.logging.level(),
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        if self.source.prefers_snapshot() && self.source.snapshot.is_none() {
            return Err(ConfigError::invalid(
                "source.prefer_snapshot",
                "set but source.snapshot is missing",
            ));
        }
        Ok(())
    }

    /// Pick the file to load for a workspace.
    ///
    /// Relative paths resolve against `workspace_root`. A preferred snapshot
    /// wins when it exists on disk; otherwise `source.path` is used, and a
    /// lone existing snapshot is the last resort.
    pub fn resolve_source(&self, workspace_root: &Path) -> Result<PathBuf, ConfigError> {
        let path = self
            .source
            .path
            .as_deref()
            .map(|p| resolve(workspace_root, p));
        let snapshot = self
            .source
            .snapshot
            .as_deref()
            .map(|p| resolve(workspace_root, p))
            .filter(|p| p.exists());

        if self.source.prefers_snapshot() {
            if let Some(snapshot) = snapshot.clone() {
                debug!("Using preferred snapshot {:?}", snapshot);
                return Ok(snapshot);
            }
        }

        path.or(snapshot).ok_or(ConfigError::NoSource)
    }
}

fn resolve(workspace_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace_root.join(path)
    }
}
