//! CLI command implementations
//!
//! Every command receives a [`Session`]: the parsed global options, the
//! workspace directory and the merged configuration.

pub mod config;
pub mod domains;
pub mod dump;
pub mod lemmas;
pub mod relations;
pub mod stats;
pub mod synset;
pub mod unit;

use std::path::PathBuf;

use anyhow::{Context, Result};
use plwordnet_config::{ConfigLoader, WordnetConfig};
use plwordnet_core::Wordnet;
use serde::Serialize;

use crate::progress;
use crate::GlobalOptions;

/// State shared by all commands of one invocation.
#[derive(Debug)]
pub struct Session {
    pub global: GlobalOptions,
    pub workspace: PathBuf,
    pub config: WordnetConfig,
}

impl Session {
    /// Resolve the workspace and load configuration.
    pub fn open(global: GlobalOptions) -> Result<Self> {
        let workspace = std::env::current_dir().context("Failed to get current directory")?;
        let config = load_config(&global, &workspace)?;
        Ok(Self {
            global,
            workspace,
            config,
        })
    }

    pub fn quiet(&self) -> bool {
        self.global.quiet
    }

    /// The file the wordnet will be loaded from.
    pub fn source_path(&self) -> Result<PathBuf> {
        self.config
            .resolve_source(&self.workspace)
            .context("Failed to resolve wordnet source")
    }

    /// Load the configured wordnet behind a spinner.
    pub fn open_wordnet(&self) -> Result<Wordnet> {
        let path = self.source_path()?;
        let pb = progress::spinner(&format!("Loading {}", path.display()), self.quiet());

        match plwordnet_core::load(&path) {
            Ok(wordnet) => {
                progress::finish_spinner(
                    pb,
                    &format!(
                        "Loaded {} lexical units and {} synsets",
                        wordnet.lexical_units().len(),
                        wordnet.synsets().len()
                    ),
                );
                Ok(wordnet)
            }
            Err(e) => {
                progress::finish_spinner_error(pb, "Load failed");
                Err(e).with_context(|| format!("Failed to load wordnet from {}", path.display()))
            }
        }
    }
}

/// Load configuration with optional config file override.
pub fn load_config(global: &GlobalOptions, workspace: &std::path::Path) -> Result<WordnetConfig> {
    let mut loader = ConfigLoader::new();
    let overrides = global.to_config_overrides();

    let config = if let Some(ref config_path) = global.config {
        loader
            .load_with_file(config_path, Some(&overrides))
            .with_context(|| format!("Failed to load config file {}", config_path.display()))?
    } else {
        loader
            .load(workspace, Some(&overrides))
            .context("Failed to load configuration")?
    };

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Print one value as a single JSON line.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Print an info message (respects quiet flag).
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", message);
    }
}
