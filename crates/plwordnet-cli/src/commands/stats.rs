//! Stats command - Entity and relation counts

use anyhow::Result;

use super::{print_json, Session};

/// Execute the stats command
pub fn execute(session: &Session) -> Result<()> {
    let source = session.source_path()?;
    let wordnet = session.open_wordnet()?;

    if session.quiet() {
        print_json(&serde_json::json!({
            "source": source,
            "counts": wordnet.counts(),
            "lemmas": wordnet.lemma_count(),
        }))?;
    } else {
        println!("Source: {}", source.display());
        println!("{}", wordnet);
        println!("  distinct lemmas: {}", wordnet.lemma_count());
    }

    Ok(())
}
