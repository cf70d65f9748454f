//! The immutable lexical graph
//!
//! A [`Wordnet`] is produced once by the [`WordnetBuilder`](crate::WordnetBuilder)
//! or by decoding a snapshot, and is read-only afterwards. It exposes no
//! `&mut self` methods, so sharing it behind an `Arc` across reader threads
//! needs no locking.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::index::TripleTable;
use crate::model::{Id, LexicalUnit, RelationType, Synset};

/// Count keys reported by [`Wordnet::counts`], in display order.
pub const COUNT_KEYS: [&str; 5] = [
    "lexical_units",
    "synsets",
    "relation_types",
    "synset_relations",
    "lexical_relations",
];

/// Entities, relation tables and derived indices of one loaded dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wordnet {
    relation_types: HashMap<Id, RelationType>,
    synsets: HashMap<Id, Synset>,
    lexical_units: HashMap<Id, LexicalUnit>,
    lexical_units_by_name: HashMap<String, BTreeSet<Id>>,
    lexical_relations: TripleTable,
    synset_relations: TripleTable,
}

impl Wordnet {
    pub(crate) fn from_parts(
        relation_types: HashMap<Id, RelationType>,
        synsets: HashMap<Id, Synset>,
        lexical_units: HashMap<Id, LexicalUnit>,
        lexical_units_by_name: HashMap<String, BTreeSet<Id>>,
        lexical_relations: TripleTable,
        synset_relations: TripleTable,
    ) -> Self {
        Self {
            relation_types,
            synsets,
            lexical_units,
            lexical_units_by_name,
            lexical_relations,
            synset_relations,
        }
    }

    // ------------------------------------------------------------------------
    // Entity lookup
    // ------------------------------------------------------------------------

    pub fn lexical_unit(&self, id: Id) -> Option<&LexicalUnit> {
        self.lexical_units.get(&id)
    }

    pub fn synset(&self, id: Id) -> Option<&Synset> {
        self.synsets.get(&id)
    }

    pub fn relation_type(&self, id: Id) -> Option<&RelationType> {
        self.relation_types.get(&id)
    }

    pub fn lexical_units(&self) -> &HashMap<Id, LexicalUnit> {
        &self.lexical_units
    }

    pub fn synsets(&self) -> &HashMap<Id, Synset> {
        &self.synsets
    }

    pub fn relation_types(&self) -> &HashMap<Id, RelationType> {
        &self.relation_types
    }

    pub fn lexical_relations(&self) -> &TripleTable {
        &self.lexical_relations
    }

    pub fn synset_relations(&self) -> &TripleTable {
        &self.synset_relations
    }

    /// Owning synset of a unit, if it was linked
    pub fn synset_of(&self, unit: &LexicalUnit) -> Option<&Synset> {
        unit.synset_id.and_then(|id| self.synsets.get(&id))
    }

    /// Linked members of a synset, in declaration order
    pub fn members<'a>(
        &'a self,
        synset: &'a Synset,
    ) -> impl Iterator<Item = &'a LexicalUnit> + 'a {
        synset
            .members
            .iter()
            .filter_map(|id| self.lexical_units.get(id))
    }

    /// Ids of all units sharing the exact surface name
    pub fn lemma_ids(&self, name: &str) -> Option<&BTreeSet<Id>> {
        self.lexical_units_by_name.get(name)
    }

    /// Number of distinct surface names
    pub fn lemma_count(&self) -> usize {
        self.lexical_units_by_name.len()
    }

    /// Render a synset as `{#id : lemma.variant ...}`
    pub fn display_synset(&self, synset: &Synset) -> String {
        let lemmas: Vec<String> = self.members(synset).map(ToString::to_string).collect();
        format!("{{#{} : {}}}", synset.id, lemmas.join(" "))
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    /// Cardinality of every entity map and relation table.
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        let sizes = [
            self.lexical_units.len(),
            self.synsets.len(),
            self.relation_types.len(),
            self.synset_relations.len(),
            self.lexical_relations.len(),
        ];
        COUNT_KEYS.into_iter().zip(sizes).collect()
    }
}

impl fmt::Display for Wordnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.counts();
        write!(f, "PlWordnet")?;
        for key in COUNT_KEYS {
            let count = counts.get(key).copied().unwrap_or_default();
            write!(f, "\n  {}: {}", key.replace('_', " "), count)?;
        }
        Ok(())
    }
}
