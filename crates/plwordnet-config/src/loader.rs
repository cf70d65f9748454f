//! Configuration loader with inheritance support.
//!
//! Loads configuration from multiple sources and merges them:
//! 1. Global config: `~/.plwordnet/config.toml`
//! 2. Local config: `.plwordnet/config.toml` (in workspace), or an explicit file
//! 3. CLI overrides
//!
//! Later sources override earlier ones.

use crate::error::ConfigError;
use crate::{ConfigOverrides, LoggingConfig, SourceConfig, WordnetConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Global configuration directory name.
const GLOBAL_CONFIG_DIR: &str = ".plwordnet";

/// Local configuration directory name.
const LOCAL_CONFIG_DIR: &str = ".plwordnet";

/// Configuration loader with caching and inheritance support.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Global config directory (e.g., `~/.plwordnet`)
    global_config_dir: Option<PathBuf>,

    /// Cached global config
    global_config: Option<WordnetConfig>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    ///
    /// Automatically detects the global config directory (`~/.plwordnet`).
    pub fn new() -> Self {
        let global_config_dir = dirs::home_dir().map(|h| h.join(GLOBAL_CONFIG_DIR));

        Self {
            global_config_dir,
            global_config: None,
        }
    }

    /// Create a loader with a custom global config directory.
    ///
    /// Useful for testing.
    pub fn with_global_dir(global_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_config_dir: Some(global_dir.into()),
            global_config: None,
        }
    }

    /// Get the global config file path.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir
            .as_ref()
            .map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Get the local config file path for a workspace.
    pub fn local_config_path(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(LOCAL_CONFIG_DIR).join(CONFIG_FILE_NAME)
    }

    /// Load configuration for a workspace with optional CLI overrides.
    ///
    /// Merges config in order: global → local → overrides.
    pub fn load(
        &mut self,
        workspace_root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<WordnetConfig, ConfigError> {
        let local = self.load_local(workspace_root)?;
        self.layer(local, overrides)
    }

    /// Load configuration with an explicit file in place of the local one.
    ///
    /// Merges config in order: global → `path` → overrides. Unlike the
    /// local config, the file must exist.
    pub fn load_with_file(
        &mut self,
        path: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<WordnetConfig, ConfigError> {
        debug!("Loading config file {:?}", path);
        let explicit = load_config_file(path)?;
        self.layer(Some(explicit), overrides)
    }

    fn layer(
        &mut self,
        local: Option<WordnetConfig>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<WordnetConfig, ConfigError> {
        let mut config = WordnetConfig::default();

        if let Some(global_config) = self.load_global()? {
            config = merge_configs(config, global_config);
        }

        if let Some(local_config) = local {
            config = merge_configs(config, local_config);
        }

        if let Some(ovr) = overrides {
            config.apply_overrides(ovr);
        }

        Ok(config)
    }

    /// Load only the global configuration.
    pub fn load_global(&mut self) -> Result<Option<WordnetConfig>, ConfigError> {
        if let Some(ref config) = self.global_config {
            return Ok(Some(config.clone()));
        }

        let Some(global_path) = self.global_config_path() else {
            debug!("No home directory found, skipping global config");
            return Ok(None);
        };

        if !global_path.exists() {
            trace!("Global config not found at {:?}", global_path);
            return Ok(None);
        }

        debug!("Loading global config from {:?}", global_path);
        let config = load_config_file(&global_path)?;

        self.global_config = Some(config.clone());

        Ok(Some(config))
    }

    /// Load only the local configuration for a workspace.
    pub fn load_local(&self, workspace_root: &Path) -> Result<Option<WordnetConfig>, ConfigError> {
        let local_path = self.local_config_path(workspace_root);

        if !local_path.exists() {
            trace!("Local config not found at {:?}", local_path);
            return Ok(None);
        }

        debug!("Loading local config from {:?}", local_path);
        load_config_file(&local_path).map(Some)
    }

    /// Initialize global configuration directory.
    ///
    /// Creates `~/.plwordnet/config.toml` with the logging defaults spelled out.
    pub fn init_global(&self) -> Result<PathBuf, ConfigError> {
        let Some(ref global_dir) = self.global_config_dir else {
            return Err(ConfigError::NoHomeDir);
        };
        let config = WordnetConfig {
            logging: LoggingConfig::defaults(),
            ..Default::default()
        };
        init_config_file(global_dir, &config)
    }

    /// Initialize local configuration for a workspace.
    ///
    /// Creates `.plwordnet/config.toml` from `config`, leaving an existing
    /// file untouched.
    pub fn init_local(
        &self,
        workspace_root: &Path,
        config: &WordnetConfig,
    ) -> Result<PathBuf, ConfigError> {
        init_config_file(&workspace_root.join(LOCAL_CONFIG_DIR), config)
    }
}

/// Write `config` into `dir/config.toml` unless the file already exists.
fn init_config_file(dir: &Path, config: &WordnetConfig) -> Result<PathBuf, ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::write(dir, e))?;
    }

    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        save_config_file(&config_path, config)?;
    }

    Ok(config_path)
}

/// Load a configuration file from disk.
fn load_config_file(path: &Path) -> Result<WordnetConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;

    toml::from_str(&content).map_err(|e| ConfigError::parse(path, e))
}

/// Save a configuration file to disk.
fn save_config_file(path: &Path, config: &WordnetConfig) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write(path, e))
}

/// Merge two configurations, with `overlay` taking precedence.
///
/// This performs a field-by-field merge, allowing partial configs.
fn merge_configs(base: WordnetConfig, overlay: WordnetConfig) -> WordnetConfig {
    WordnetConfig {
        source: merge_source(base.source, overlay.source),
        logging: merge_logging(base.logging, overlay.logging),
    }
}

/// Merge source config, set overlay values override base.
fn merge_source(base: SourceConfig, overlay: SourceConfig) -> SourceConfig {
    SourceConfig {
        path: overlay.path.or(base.path),
        snapshot: overlay.snapshot.or(base.snapshot),
        prefer_snapshot: overlay.prefer_snapshot.or(base.prefer_snapshot),
    }
}

/// Merge logging config, set overlay values override base.
fn merge_logging(base: LoggingConfig, overlay: LoggingConfig) -> LoggingConfig {
    LoggingConfig {
        level: overlay.level.or(base.level),
        format: overlay.format.or(base.format),
    }
}
