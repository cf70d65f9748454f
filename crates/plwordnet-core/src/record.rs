//! Tagged attribute records
//!
//! A record is what the dump reader hands to the builder: a kind tag plus a
//! string-keyed field map. All numeric and boolean parsing happens here, so
//! the reader never interprets values.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::builder::BuildError;
use crate::model::Id;

/// Field holding the comma-separated member ids of a synset record.
pub const SYNSET_UNITS_FIELD: &str = "unit-ids";

/// Kinds of records found in a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    RelationType,
    LexicalUnit,
    Synset,
    SynsetRelation,
    LexicalRelation,
}

impl RecordKind {
    /// All kinds, in the order the builder reports them
    pub const ALL: [RecordKind; 5] = [
        RecordKind::RelationType,
        RecordKind::LexicalUnit,
        RecordKind::Synset,
        RecordKind::SynsetRelation,
        RecordKind::LexicalRelation,
    ];

    /// Element name used for this kind in plWordNet XML dumps
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::RelationType => "relationtypes",
            RecordKind::LexicalUnit => "lexical-unit",
            RecordKind::Synset => "synset",
            RecordKind::SynsetRelation => "synsetrelations",
            RecordKind::LexicalRelation => "lexicalrelations",
        }
    }

    /// Resolve an XML element name to a record kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Get the string representation used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::RelationType => "relation-type",
            RecordKind::LexicalUnit => "lexical-unit",
            RecordKind::Synset => "synset",
            RecordKind::SynsetRelation => "synset-relation",
            RecordKind::LexicalRelation => "lexical-relation",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tagged attribute record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub kind: RecordKind,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            fields: HashMap::new(),
        }
    }

    /// Builder-style field setter, mostly for tests and hand-made records
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Text field; missing means empty.
    pub fn text(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    /// Required numeric field.
    pub fn number<T: FromStr>(&self, field: &str) -> Result<T, BuildError> {
        let raw = self
            .get(field)
            .ok_or_else(|| BuildError::parse(self.kind, field, None))?;
        raw.trim()
            .parse()
            .map_err(|_| BuildError::parse(self.kind, field, Some(raw)))
    }

    /// Optional numeric field; absent or blank is `None`.
    pub fn optional_number<T: FromStr>(&self, field: &str) -> Result<Option<T>, BuildError> {
        match self.get(field).map(str::trim) {
            None | Some("") => Ok(None),
            Some(_) => self.number(field).map(Some),
        }
    }

    /// Boolean field; missing is `false`.
    pub fn flag(&self, field: &str) -> Result<bool, BuildError> {
        let Some(raw) = self.get(field) else {
            return Ok(false);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(BuildError::parse(self.kind, field, Some(raw))),
        }
    }

    /// Comma-separated set of labels, blanks dropped.
    pub fn label_set(&self, field: &str) -> BTreeSet<String> {
        self.get(field)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Comma-separated id list, in order.
    pub fn id_list(&self, field: &str) -> Result<Vec<Id>, BuildError> {
        self.get(field)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse()
                    .map_err(|_| BuildError::parse(self.kind, field, Some(s)))
            })
            .collect()
    }
}
