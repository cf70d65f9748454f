//! Unit command - One lexical unit with its relations

use anyhow::{Context, Result};
use clap::Args;
use plwordnet_core::{domains, Id, TriplePattern};

use super::relations::{lexical_rows, print_rows};
use super::{print_json, Session};

/// Arguments for the unit command
#[derive(Args, Debug)]
pub struct UnitArgs {
    /// Lexical unit id
    id: Id,

    /// Render relations with their shortcut instead of the display template
    #[arg(long)]
    short: bool,
}

/// Execute the unit command
pub fn execute(args: UnitArgs, session: &Session) -> Result<()> {
    let wordnet = session.open_wordnet()?;
    let unit = wordnet
        .lexical_unit(args.id)
        .with_context(|| format!("Lexical unit {} not found", args.id))?;

    let outgoing = lexical_rows(
        wordnet.lexical_relations_where(TriplePattern::new().subject(unit))?,
        args.short,
    );
    let incoming = lexical_rows(
        wordnet.lexical_relations_where(TriplePattern::new().object(unit))?,
        args.short,
    );
    let synset = wordnet.synset_of(unit);

    if session.quiet() {
        return print_json(&serde_json::json!({
            "unit": unit,
            "synset": synset.map(|s| wordnet.display_synset(s)),
            "outgoing": outgoing,
            "incoming": incoming,
        }));
    }

    println!("{} (lexical unit {})", unit, unit.id);
    println!("  pos: {}", unit.pos);
    match domains::lookup(&unit.domain) {
        Some(domain) => println!("  domain: {} ({})", unit.domain, domain.name),
        None => println!("  domain: {}", unit.domain),
    }
    println!("  tag count: {}", unit.tag_count);
    if !unit.description.is_empty() {
        println!("  description: {}", unit.description);
    }
    match synset {
        Some(synset) => println!("  synset: {}", wordnet.display_synset(synset)),
        None => println!("  synset: -"),
    }

    println!("\nOutgoing relations ({}):", outgoing.len());
    print_rows(&outgoing);
    println!("\nIncoming relations ({}):", incoming.len());
    print_rows(&incoming);

    Ok(())
}
