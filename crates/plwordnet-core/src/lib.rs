//! plWordNet Core - Lexical knowledge graph with triple-pattern queries
//!
//! This crate provides:
//! - The entity model (relation types, synsets, lexical units)
//! - A one-shot builder that links units to synsets and validates relations
//! - Per-role triple indices and the pattern query engine
//! - Streaming XML reading, xz/gzip transport and binary snapshots
//! - The static domain code table

pub mod builder;
pub mod domains;
pub mod index;
pub mod model;
pub mod query;
pub mod record;
pub mod snapshot;
pub mod source;
pub mod wordnet;
pub mod xml;

// Model re-exports
pub use model::{Entity, Id, LexicalUnit, RelationType, Synset, Triple};
pub use record::{RawRecord, RecordKind, SYNSET_UNITS_FIELD};
pub use wordnet::{Wordnet, COUNT_KEYS};

// Builder re-exports
pub use builder::{build, BuildError, WordnetBuilder};

// Query re-exports
pub use index::{Role, TripleIndex, TripleTable};
pub use query::{
    LexicalRelation, QueryError, Relation, RelationTable, SynsetRelation, Term, TriplePattern,
};

// I/O re-exports
pub use snapshot::SnapshotError;
pub use source::{
    load, load_from_reader, LoadError, SourceFormat, SourceKind, Transport, SNAPSHOT_EXTENSION,
};
pub use xml::{RecordReader, XmlError};

pub use domains::Domain;
