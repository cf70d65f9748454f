//! Config command - View and initialize configuration
//!
//! - Show the effective (merged) configuration
//! - Show configuration file paths
//! - Create a local or global config file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plwordnet_config::{ConfigLoader, SourceConfig, WordnetConfig};
use serde::Serialize;

use super::{print_json, Session};

/// Config management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file paths
    Path,

    /// Create a config file with defaults
    Init(InitArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Create ~/.plwordnet/config.toml instead of the local file
    #[arg(long)]
    global: bool,
}

/// Configuration paths
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPaths {
    /// Global config file path
    pub global: Option<PathBuf>,
    /// Local config file path
    pub local: PathBuf,
    /// Whether global config exists
    pub global_exists: bool,
    /// Whether local config exists
    pub local_exists: bool,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, session: &Session) -> Result<()> {
    match cmd {
        ConfigCommand::Show => execute_show(session),
        ConfigCommand::Path => execute_path(session),
        ConfigCommand::Init(args) => execute_init(args, session),
    }
}

fn execute_show(session: &Session) -> Result<()> {
    if session.quiet() {
        return print_json(&session.config);
    }
    let content = toml::to_string_pretty(&session.config).context("Failed to render config")?;
    print!("{}", content);
    Ok(())
}

fn execute_path(session: &Session) -> Result<()> {
    let loader = ConfigLoader::new();
    let global = loader.global_config_path();
    let local = loader.local_config_path(&session.workspace);
    let paths = ConfigPaths {
        global_exists: global.as_ref().is_some_and(|p| p.exists()),
        local_exists: local.exists(),
        global,
        local,
    };

    if session.quiet() {
        return print_json(&paths);
    }

    match paths.global {
        Some(ref path) => {
            println!("global: {} ({})", path.display(), exists(paths.global_exists))
        }
        None => println!("global: (no home directory)"),
    }
    println!("local:  {} ({})", paths.local.display(), exists(paths.local_exists));
    Ok(())
}

fn execute_init(args: InitArgs, session: &Session) -> Result<()> {
    let loader = ConfigLoader::new();
    let path = if args.global {
        loader
            .init_global()
            .context("Failed to create global config")?
    } else {
        let config = WordnetConfig {
            source: SourceConfig {
                path: session.global.source.clone(),
                ..Default::default()
            },
            ..Default::default()
        };
        loader
            .init_local(&session.workspace, &config)
            .context("Failed to create local config")?
    };

    if session.quiet() {
        return print_json(&serde_json::json!({ "path": path }));
    }
    println!("Config file: {}", path.display());
    Ok(())
}

fn exists(flag: bool) -> &'static str {
    if flag {
        "exists"
    } else {
        "missing"
    }
}
