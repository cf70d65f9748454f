//! Common test utilities for integration tests.
//!
//! Fixture paths, a loaded fixture wordnet and helpers that enumerate every
//! query a wordnet can answer, so two graphs can be compared by behavior.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use xz2::write::XzEncoder;
use plwordnet_core::{Id, Triple, TriplePattern, Wordnet};

/// Number of entities and relations in `mini.xml`.
pub const MINI_COUNTS: [(&str, usize); 5] = [
    ("lexical_units", 6),
    ("synsets", 5),
    ("relation_types", 4),
    ("synset_relations", 4),
    ("lexical_relations", 3),
];

/// Get the path to the fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn mini_xml() -> PathBuf {
    fixtures_dir().join("mini.xml")
}

pub fn load_mini() -> Wordnet {
    plwordnet_core::load(mini_xml()).expect("mini.xml should load")
}

/// Write a gzip'ed copy of `source` into `dir` under `name`.
pub fn gzip_copy(source: &Path, dir: &Path, name: &str) -> PathBuf {
    let bytes = std::fs::read(source).expect("fixture readable");
    let target = dir.join(name);
    let mut encoder = GzEncoder::new(File::create(&target).unwrap(), Compression::default());
    encoder.write_all(&bytes).unwrap();
    encoder.finish().unwrap();
    target
}

/// Write an xz-compressed copy of `source` into `dir` under `name`.
pub fn xz_copy(source: &Path, dir: &Path, name: &str) -> PathBuf {
    let bytes = std::fs::read(source).expect("fixture readable");
    let target = dir.join(name);
    let mut encoder = XzEncoder::new(File::create(&target).unwrap(), 6);
    encoder.write_all(&bytes).unwrap();
    encoder.finish().unwrap();
    target
}

/// Every single-role lexical query over the ids used by the graph, with its
/// answer as sorted triples.
pub fn lexical_answers(wordnet: &Wordnet) -> Vec<(String, BTreeSet<Triple>)> {
    let mut answers = Vec::new();
    for id in sample_ids(wordnet) {
        for (label, pattern) in [
            ("subject", TriplePattern::new().subject(id)),
            ("predicate", TriplePattern::new().predicate(id)),
            ("object", TriplePattern::new().object(id)),
        ] {
            let hits = wordnet.lexical_relations_where(pattern).unwrap();
            let triples = hits.iter().map(|r| r.triple()).collect();
            answers.push((format!("{label}={id}"), triples));
        }
    }
    answers
}

/// Same as [`lexical_answers`] for the synset table.
pub fn synset_answers(wordnet: &Wordnet) -> Vec<(String, BTreeSet<Triple>)> {
    let mut answers = Vec::new();
    for id in sample_ids(wordnet) {
        for (label, pattern) in [
            ("subject", TriplePattern::new().subject(id)),
            ("predicate", TriplePattern::new().predicate(id)),
            ("object", TriplePattern::new().object(id)),
        ] {
            let hits = wordnet.synset_relations_where(pattern).unwrap();
            let triples = hits.iter().map(|r| r.triple()).collect();
            answers.push((format!("{label}={id}"), triples));
        }
    }
    answers
}

/// Lemma lookups for every known name, as sorted unit ids.
pub fn lemma_answers(wordnet: &Wordnet) -> Vec<(String, Vec<Id>)> {
    let names: BTreeSet<&str> = wordnet
        .lexical_units()
        .values()
        .map(|u| u.name.as_str())
        .collect();
    names
        .into_iter()
        .map(|name| {
            let mut ids: Vec<Id> = wordnet.lemmas(name).iter().map(|u| u.id).collect();
            ids.sort_unstable();
            (name.to_string(), ids)
        })
        .collect()
}

/// All entity ids plus one id that exists nowhere.
fn sample_ids(wordnet: &Wordnet) -> BTreeSet<Id> {
    let mut ids: BTreeSet<Id> = wordnet.lexical_units().keys().copied().collect();
    ids.extend(wordnet.synsets().keys().copied());
    ids.extend(wordnet.relation_types().keys().copied());
    ids.insert(Id::MAX);
    ids
}
