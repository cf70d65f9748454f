//! Lemmas command - All senses of a surface form

use anyhow::Result;
use clap::Args;
use plwordnet_core::LexicalUnit;

use super::{print_json, Session};

/// Arguments for the lemmas command
#[derive(Args, Debug)]
pub struct LemmasArgs {
    /// Exact lemma to look up (case-sensitive)
    name: String,
}

/// Execute the lemmas command
pub fn execute(args: LemmasArgs, session: &Session) -> Result<()> {
    let wordnet = session.open_wordnet()?;

    let mut units: Vec<&LexicalUnit> = wordnet.lemmas(&args.name).into_iter().collect();
    units.sort_by_key(|u| (u.variant, u.id));

    if session.quiet() {
        for unit in &units {
            print_json(unit)?;
        }
        return Ok(());
    }

    if units.is_empty() {
        println!("No lexical units named '{}'", args.name);
        return Ok(());
    }

    println!("Found {} lexical units for '{}':\n", units.len(), args.name);
    for unit in &units {
        let synset = wordnet
            .synset_of(unit)
            .map(|s| wordnet.display_synset(s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<20} id={:<8} {:<12} {:<6} {}",
            unit.to_string(),
            unit.id,
            unit.pos,
            unit.domain,
            synset
        );
    }

    Ok(())
}
