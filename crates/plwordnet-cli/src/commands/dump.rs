//! Dump command - Write a binary snapshot

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::{print_info, print_json, Session};
use crate::progress;

/// Arguments for the dump command
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Snapshot file to write (`.snap`, optionally `.gz` or `.xz` compressed)
    output: PathBuf,
}

/// Execute the dump command
pub fn execute(args: DumpArgs, session: &Session) -> Result<()> {
    let wordnet = session.open_wordnet()?;

    let pb = progress::spinner(
        &format!("Writing snapshot to {}", args.output.display()),
        session.quiet(),
    );
    if let Err(e) = wordnet.dump(&args.output) {
        progress::finish_spinner_error(pb, "Snapshot failed");
        return Err(e)
            .with_context(|| format!("Failed to write snapshot {}", args.output.display()));
    }
    progress::finish_spinner(pb, &format!("Wrote {}", args.output.display()));

    if session.quiet() {
        print_json(&serde_json::json!({
            "output": args.output,
            "counts": wordnet.counts(),
        }))?;
    }
    print_info(
        "Point source.snapshot at this file and set source.prefer_snapshot = true to use it",
        session.quiet(),
    );

    Ok(())
}
