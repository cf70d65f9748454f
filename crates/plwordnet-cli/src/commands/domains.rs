//! Domains command - The domain code table

use anyhow::{Context, Result};
use clap::Args;
use plwordnet_core::domains;

use super::{print_json, Session};

/// Arguments for the domains command
#[derive(Args, Debug)]
pub struct DomainsArgs {
    /// Show a single domain code (e.g. "zw")
    code: Option<String>,
}

/// Execute the domains command
pub fn execute(args: DomainsArgs, session: &Session) -> Result<()> {
    let selected: Vec<&domains::Domain> = match args.code {
        Some(ref code) => {
            let domain = domains::lookup(code)
                .with_context(|| format!("Unknown domain code '{}'", code))?;
            vec![domain]
        }
        None => domains::all().collect(),
    };

    for domain in selected {
        if session.quiet() {
            print_json(domain)?;
        } else {
            println!("  {:<6} {:<5} {}", domain.code, domain.pos, domain.name);
        }
    }

    Ok(())
}
