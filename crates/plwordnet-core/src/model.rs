//! Entity model for the lexical graph
//!
//! Relation types, synsets and lexical units are plain id-keyed records.
//! References between them are stored as ids and resolved through the owning
//! [`Wordnet`](crate::Wordnet), so there are no ownership cycles between a
//! synset and its members.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier shared by every entity kind.
pub type Id = u64;

// ============================================================================
// Relation Types
// ============================================================================

/// A typed, directed relation definition (e.g. hypernymy).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationType {
    pub id: Id,

    /// Parent relation type in the relation hierarchy
    pub parent: Option<Id>,

    pub name: String,

    /// Relation category as declared by the dump (e.g. "relacja pomiędzy synsetami")
    pub category: String,

    pub description: String,

    /// Short symbol used when rendering compactly (e.g. "hiper")
    pub shortcut: String,

    /// Display template with `<x#>` and `<y#>` placeholders
    pub display: String,

    /// Parts of speech this relation applies to
    pub pos: BTreeSet<String>,

    /// Inverse relation type, when one is defined
    pub reverse: Option<Id>,

    /// Whether the inverse is created automatically
    pub autoreverse: bool,
}

impl RelationType {
    /// Render one instance of this relation between `x` and `y`.
    ///
    /// Uses the display template unless `short` is requested or the template
    /// is empty, in which case the form is `"x shortcut y"`.
    pub fn format(&self, x: impl fmt::Display, y: impl fmt::Display, short: bool) -> String {
        if short || self.display.is_empty() {
            format!("{} {} {}", x, self.shortcut, y)
        } else {
            self.display
                .replace("<x#>", &x.to_string())
                .replace("<y#>", &y.to_string())
        }
    }

    /// Check whether this relation applies to the given part of speech
    pub fn applies_to(&self, pos: &str) -> bool {
        self.pos.contains(pos)
    }
}

// ============================================================================
// Synsets
// ============================================================================

/// A set of lexical units treated as synonymous in one sense.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Synset {
    pub id: Id,

    /// Member unit ids exactly as declared by the source
    pub unit_ids: Vec<Id>,

    /// Linked members, in declaration order, each at most once.
    ///
    /// Populated by the linker; resolve with [`Wordnet::members`](crate::Wordnet::members).
    pub members: Vec<Id>,

    pub split: i64,
    pub definition: String,
    pub description: String,
    pub is_abstract: bool,
}

// ============================================================================
// Lexical Units
// ============================================================================

/// A single word sense.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LexicalUnit {
    pub id: Id,

    /// Lemma (surface word form)
    pub name: String,

    /// Part of speech label as declared by the source
    pub pos: String,

    /// Domain code, see [`crate::domains`]
    pub domain: String,

    pub description: String,
    pub variant: i64,
    pub tag_count: i64,

    /// Owning synset, unset until linked
    pub synset_id: Option<Id>,
}

impl fmt::Display for LexicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.variant)
    }
}

// ============================================================================
// Triples
// ============================================================================

/// A `(subject, predicate, object)` row of a relation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Id,
    pub predicate: Id,
    pub object: Id,
}

impl Triple {
    pub fn new(subject: Id, predicate: Id, object: Id) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// Anything addressable by an entity id.
pub trait Entity {
    fn id(&self) -> Id;
}

impl Entity for RelationType {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for Synset {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for LexicalUnit {
    fn id(&self) -> Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hyponymy() -> RelationType {
        RelationType {
            id: 10,
            parent: None,
            name: "hiponimia".to_string(),
            category: "relacja leksykalna".to_string(),
            description: String::new(),
            shortcut: "hipo".to_string(),
            display: "<x#> jest rodzajem <y#>".to_string(),
            pos: ["noun".to_string()].into_iter().collect(),
            reverse: Some(11),
            autoreverse: false,
        }
    }

    #[test]
    fn test_format_uses_display_template() {
        let rel = hyponymy();
        assert_eq!(rel.format("pies", "zwierzę", false), "pies jest rodzajem zwierzę");
    }

    #[test]
    fn test_format_short_form() {
        let rel = hyponymy();
        assert_eq!(rel.format("pies", "zwierzę", true), "pies hipo zwierzę");

        let bare = RelationType {
            display: String::new(),
            ..hyponymy()
        };
        assert_eq!(bare.format(1, 2, false), "1 hipo 2");
    }

    #[test]
    fn test_applies_to() {
        let rel = hyponymy();
        assert!(rel.applies_to("noun"));
        assert!(!rel.applies_to("verb"));
    }

    #[test]
    fn test_lexical_unit_display() {
        let unit = LexicalUnit {
            id: 1,
            name: "zamek".to_string(),
            pos: "noun".to_string(),
            domain: "wytw".to_string(),
            description: String::new(),
            variant: 2,
            tag_count: 0,
            synset_id: None,
        };
        assert_eq!(unit.to_string(), "zamek.2");
    }
}
