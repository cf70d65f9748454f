//! Relations command - Triple-pattern queries over a relation table

use std::collections::HashSet;

use anyhow::Result;
use clap::{Args, ValueEnum};
use plwordnet_core::{Entity, Id, LexicalUnit, Relation, Synset, TriplePattern, Wordnet};
use serde::Serialize;

use super::{print_json, Session};

/// Arguments for the relations command
#[derive(Args, Debug)]
pub struct RelationsArgs {
    /// Relation table to query
    table: Table,

    /// Subject (parent) entity id
    #[arg(long)]
    subject: Option<Id>,

    /// Relation type id
    #[arg(long)]
    predicate: Option<Id>,

    /// Object (child) entity id
    #[arg(long)]
    object: Option<Id>,

    /// Render relations with their shortcut instead of the display template
    #[arg(long)]
    short: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Table {
    /// Relations between lexical units
    Lexical,
    /// Relations between synsets
    Synset,
}

/// One matched triple, resolved for output
#[derive(Debug, Clone, Serialize)]
pub struct RelationRow {
    pub subject: Id,
    pub predicate: Id,
    pub object: Id,
    pub relation: String,
    pub text: String,
}

/// Execute the relations command
pub fn execute(args: RelationsArgs, session: &Session) -> Result<()> {
    let wordnet = session.open_wordnet()?;

    let rows = match args.table {
        Table::Lexical => {
            let pattern = TriplePattern::from_ids(args.subject, args.predicate, args.object);
            lexical_rows(wordnet.lexical_relations_where(pattern)?, args.short)
        }
        Table::Synset => {
            let pattern = TriplePattern::from_ids(args.subject, args.predicate, args.object);
            synset_rows(&wordnet, wordnet.synset_relations_where(pattern)?, args.short)
        }
    };

    if session.quiet() {
        for row in &rows {
            print_json(row)?;
        }
        return Ok(());
    }

    if rows.is_empty() {
        println!("No matching relations");
        return Ok(());
    }
    println!("Found {} relations:\n", rows.len());
    print_rows(&rows);

    Ok(())
}

/// Lexical relations rendered as `lemma.variant`, sorted by triple
pub fn lexical_rows(hits: HashSet<Relation<'_, LexicalUnit>>, short: bool) -> Vec<RelationRow> {
    rows(hits, |unit| unit.to_string(), short)
}

/// Synset relations rendered as `{#id : members}`, sorted by triple
pub fn synset_rows(
    wordnet: &Wordnet,
    hits: HashSet<Relation<'_, Synset>>,
    short: bool,
) -> Vec<RelationRow> {
    rows(hits, |synset| wordnet.display_synset(synset), short)
}

fn rows<E: Entity>(
    hits: HashSet<Relation<'_, E>>,
    render: impl Fn(&E) -> String,
    short: bool,
) -> Vec<RelationRow> {
    let mut relations: Vec<_> = hits.into_iter().collect();
    relations.sort_by_key(|r| r.triple());

    relations
        .into_iter()
        .map(|r| {
            let triple = r.triple();
            RelationRow {
                subject: triple.subject,
                predicate: triple.predicate,
                object: triple.object,
                relation: r.predicate.name.clone(),
                text: r.predicate.format(render(r.subject), render(r.object), short),
            }
        })
        .collect()
}

pub fn print_rows(rows: &[RelationRow]) {
    for row in rows {
        println!("  [{}] {}", row.relation, row.text);
    }
}
