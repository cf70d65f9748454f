//! plwordnet CLI - Load, query and snapshot plWordNet dumps
//!
//! A command-line interface over the lexical knowledge graph: counts, lemma
//! lookup, unit and synset inspection, triple-pattern relation queries and
//! binary snapshots.
//!
//! # Usage
//!
//! ```bash
//! # Show entity and relation counts
//! plwordnet --source plwordnet.xml.gz stats
//!
//! # List the senses of a lemma
//! plwordnet lemmas zamek
//!
//! # Hypernyms of synset 100
//! plwordnet relations synset --subject 100 --predicate 10
//!
//! # Write a snapshot for fast reloads
//! plwordnet dump plwordnet.snap.gz
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use plwordnet_config::{ConfigOverrides, LogFormat};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod progress;

use commands::Session;

/// plwordnet - Polish WordNet lexical graph explorer
#[derive(Parser, Debug)]
#[command(name = "plwordnet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Wordnet source: XML dump or snapshot, optionally .gz or .xz
    #[arg(long, short = 's', global = true, env = "PLWORDNET_SOURCE")]
    source: Option<PathBuf>,

    /// Snapshot file written by `plwordnet dump`
    #[arg(long, global = true, env = "PLWORDNET_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Load the snapshot instead of the source when it exists
    #[arg(long, global = true)]
    prefer_snapshot: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "PLWORDNET_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to configuration file
    #[arg(long, short = 'c', global = true, env = "PLWORDNET_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress non-essential output and print results as JSON lines
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

impl GlobalOptions {
    /// Convert global options to config overrides
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source: self.source.clone(),
            snapshot: self.snapshot.clone(),
            prefer_snapshot: self.prefer_snapshot.then_some(true),
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show entity and relation counts
    Stats,

    /// List lexical units with the given lemma
    Lemmas(commands::lemmas::LemmasArgs),

    /// Show a lexical unit and its relations
    Unit(commands::unit::UnitArgs),

    /// Show a synset, its members and its relations
    Synset(commands::synset::SynsetArgs),

    /// Query a relation table by subject, predicate and object
    Relations(commands::relations::RelationsArgs),

    /// Show the domain code table
    Domains(commands::domains::DomainsArgs),

    /// Write a binary snapshot of the loaded wordnet
    Dump(commands::dump::DumpArgs),

    /// View and initialize configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let session = Session::open(cli.global)?;
    init_logging(&session)?;

    match cli.command {
        Commands::Stats => commands::stats::execute(&session),
        Commands::Lemmas(args) => commands::lemmas::execute(args, &session),
        Commands::Unit(args) => commands::unit::execute(args, &session),
        Commands::Synset(args) => commands::synset::execute(args, &session),
        Commands::Relations(args) => commands::relations::execute(args, &session),
        Commands::Domains(args) => commands::domains::execute(args, &session),
        Commands::Dump(args) => commands::dump::execute(args, &session),
        Commands::Config(cmd) => commands::config::execute(cmd, &session),
    }
}

/// Install the stderr subscriber.
///
/// `--quiet` and `--verbose` win over the configured `logging.level`.
fn init_logging(session: &Session) -> Result<()> {
    let logging = &session.config.logging;
    let log_level = if session.global.quiet {
        Level::ERROR
    } else if session.global.verbose {
        Level::DEBUG
    } else {
        logging.level().parse().unwrap_or(Level::INFO)
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr);
    match logging.format() {
        LogFormat::Text => {
            tracing::subscriber::set_global_default(builder.with_ansi(true).finish())?
        }
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}
