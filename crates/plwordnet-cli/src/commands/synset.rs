//! Synset command - One synset with its members and relations

use anyhow::{Context, Result};
use clap::Args;
use plwordnet_core::{Id, LexicalUnit, TriplePattern};

use super::relations::{print_rows, synset_rows};
use super::{print_json, Session};

/// Arguments for the synset command
#[derive(Args, Debug)]
pub struct SynsetArgs {
    /// Synset id
    id: Id,

    /// Render relations with their shortcut instead of the display template
    #[arg(long)]
    short: bool,
}

/// Execute the synset command
pub fn execute(args: SynsetArgs, session: &Session) -> Result<()> {
    let wordnet = session.open_wordnet()?;
    let synset = wordnet
        .synset(args.id)
        .with_context(|| format!("Synset {} not found", args.id))?;

    let members: Vec<&LexicalUnit> = wordnet.members(synset).collect();
    let outgoing = synset_rows(
        &wordnet,
        wordnet.synset_relations_where(TriplePattern::new().subject(synset))?,
        args.short,
    );
    let incoming = synset_rows(
        &wordnet,
        wordnet.synset_relations_where(TriplePattern::new().object(synset))?,
        args.short,
    );

    if session.quiet() {
        return print_json(&serde_json::json!({
            "synset": synset,
            "members": members,
            "outgoing": outgoing,
            "incoming": incoming,
        }));
    }

    println!("{}", wordnet.display_synset(synset));
    if !synset.definition.is_empty() {
        println!("  definition: {}", synset.definition);
    }
    if !synset.description.is_empty() {
        println!("  description: {}", synset.description);
    }
    println!("  split: {}", synset.split);
    println!("  abstract: {}", synset.is_abstract);

    println!("\nMembers ({}):", members.len());
    for unit in &members {
        println!("  {:<20} id={:<8} {}", unit.to_string(), unit.id, unit.pos);
    }

    println!("\nOutgoing relations ({}):", outgoing.len());
    print_rows(&outgoing);
    println!("\nIncoming relations ({}):", incoming.len());
    print_rows(&incoming);

    Ok(())
}
