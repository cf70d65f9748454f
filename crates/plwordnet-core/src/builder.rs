//! Wordnet Builder
//!
//! Turns tagged attribute records into typed entities, links lexical units to
//! their synsets, validates every relation triple and finally freezes
//! everything into an immutable [`Wordnet`].
//!
//! ## Usage
//!
//! ```ignore
//! use plwordnet_core::{RawRecord, RecordKind, WordnetBuilder};
//!
//! let mut builder = WordnetBuilder::new();
//! builder.push(RawRecord::new(RecordKind::LexicalUnit).with("id", "1").with("name", "bank"))?;
//! let wordnet = builder.finish()?;
//! ```
//!
//! The builder is the only mutable phase. `finish` consumes it, so a failed
//! build never leaves a half-linked graph reachable.

use std::collections::{BTreeSet, HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::index::TripleTable;
use crate::model::{Id, LexicalUnit, RelationType, Synset, Triple};
use crate::record::{RawRecord, RecordKind, SYNSET_UNITS_FIELD};
use crate::wordnet::Wordnet;

// ============================================================================
// Errors
// ============================================================================

/// Errors that abort a build.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A field is missing or cannot be parsed
    #[error("{kind} record: {}", describe_field(.field, .value.as_deref()))]
    Parse {
        kind: RecordKind,
        field: String,
        value: Option<String>,
    },

    /// Two records of the same kind share an id
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: RecordKind, id: Id },

    /// A membership or relation points at an id that was never declared
    #[error("{referrer} references missing {target} {id}")]
    DanglingReference {
        referrer: String,
        target: RecordKind,
        id: Id,
    },
}

impl BuildError {
    pub(crate) fn parse(kind: RecordKind, field: &str, value: Option<&str>) -> Self {
        Self::Parse {
            kind,
            field: field.to_string(),
            value: value.map(str::to_string),
        }
    }

    fn dangling(referrer: String, target: RecordKind, id: Id) -> Self {
        Self::DanglingReference {
            referrer,
            target,
            id,
        }
    }
}

fn describe_field(field: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("malformed value '{}' for field '{}'", value, field),
        None => format!("missing required field '{}'", field),
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates records, then links and indexes them on [`finish`](Self::finish).
///
/// Records may arrive in any order; nothing is cross-checked until `finish`.
#[derive(Debug, Default)]
pub struct WordnetBuilder {
    relation_types: HashMap<Id, RelationType>,
    lexical_units: HashMap<Id, LexicalUnit>,
    synsets: HashMap<Id, Synset>,
    /// Synset ids in record order; later synsets win contested units
    synset_order: Vec<Id>,
    synset_relations: Vec<Triple>,
    lexical_relations: Vec<Triple>,
}

impl WordnetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records accepted so far.
    pub fn len(&self) -> usize {
        self.relation_types.len()
            + self.lexical_units.len()
            + self.synsets.len()
            + self.synset_relations.len()
            + self.lexical_relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse one record into an entity or triple.
    pub fn push(&mut self, record: RawRecord) -> Result<(), BuildError> {
        match record.kind {
            RecordKind::RelationType => {
                let relation_type = relation_type_from(&record)?;
                insert_unique(
                    &mut self.relation_types,
                    record.kind,
                    relation_type.id,
                    relation_type,
                )
            }
            RecordKind::LexicalUnit => {
                let unit = lexical_unit_from(&record)?;
                insert_unique(&mut self.lexical_units, record.kind, unit.id, unit)
            }
            RecordKind::Synset => {
                let synset = synset_from(&record)?;
                let id = synset.id;
                insert_unique(&mut self.synsets, record.kind, id, synset)?;
                self.synset_order.push(id);
                Ok(())
            }
            RecordKind::SynsetRelation => {
                self.synset_relations.push(triple_from(&record)?);
                Ok(())
            }
            RecordKind::LexicalRelation => {
                self.lexical_relations.push(triple_from(&record)?);
                Ok(())
            }
        }
    }

    /// Link, validate and index everything pushed so far.
    pub fn finish(self) -> Result<Wordnet, BuildError> {
        let WordnetBuilder {
            relation_types,
            mut lexical_units,
            mut synsets,
            synset_order,
            synset_relations,
            lexical_relations,
        } = self;

        link_members(&mut lexical_units, &mut synsets, &synset_order)?;
        debug!("Linked {} synsets", synsets.len());

        check_triples(
            RecordKind::LexicalRelation,
            &lexical_relations,
            &relation_types,
            |id| lexical_units.contains_key(&id),
            RecordKind::LexicalUnit,
        )?;
        check_triples(
            RecordKind::SynsetRelation,
            &synset_relations,
            &relation_types,
            |id| synsets.contains_key(&id),
            RecordKind::Synset,
        )?;

        let mut lexical_units_by_name: HashMap<String, BTreeSet<Id>> = HashMap::new();
        for unit in lexical_units.values() {
            lexical_units_by_name
                .entry(unit.name.clone())
                .or_default()
                .insert(unit.id);
        }

        let lexical_relations = TripleTable::new(lexical_relations);
        let synset_relations = TripleTable::new(synset_relations);
        debug!(
            "Indexed {} lexical and {} synset relations",
            lexical_relations.len(),
            synset_relations.len()
        );

        let wordnet = Wordnet::from_parts(
            relation_types,
            synsets,
            lexical_units,
            lexical_units_by_name,
            lexical_relations,
            synset_relations,
        );
        info!(
            "Built wordnet: {} lexical units, {} synsets, {} relation types",
            wordnet.lexical_units().len(),
            wordnet.synsets().len(),
            wordnet.relation_types().len()
        );
        Ok(wordnet)
    }
}

/// Build a wordnet from a complete record sequence.
pub fn build<I>(records: I) -> Result<Wordnet, BuildError>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut builder = WordnetBuilder::new();
    for record in records {
        builder.push(record)?;
    }
    builder.finish()
}

// ============================================================================
// Entity construction
// ============================================================================

fn insert_unique<T>(
    map: &mut HashMap<Id, T>,
    kind: RecordKind,
    id: Id,
    value: T,
) -> Result<(), BuildError> {
    if map.contains_key(&id) {
        return Err(BuildError::DuplicateId { kind, id });
    }
    map.insert(id, value);
    Ok(())
}

fn relation_type_from(record: &RawRecord) -> Result<RelationType, BuildError> {
    Ok(RelationType {
        id: record.number("id")?,
        parent: record.optional_number("parent")?,
        name: record.text("name"),
        category: record.text("type"),
        description: record.text("description"),
        shortcut: record.text("shortcut"),
        display: record.text("display"),
        pos: record.label_set("posstr"),
        reverse: record.optional_number("reverse")?,
        autoreverse: record.flag("autoreverse")?,
    })
}

fn lexical_unit_from(record: &RawRecord) -> Result<LexicalUnit, BuildError> {
    Ok(LexicalUnit {
        id: record.number("id")?,
        name: record.text("name"),
        pos: record.text("pos"),
        domain: record.text("domain"),
        description: record.text("desc"),
        variant: record.number("variant")?,
        tag_count: record.number("tagcount")?,
        synset_id: None,
    })
}

fn synset_from(record: &RawRecord) -> Result<Synset, BuildError> {
    Ok(Synset {
        id: record.number("id")?,
        unit_ids: record.id_list(SYNSET_UNITS_FIELD)?,
        members: Vec::new(),
        split: record.number("split")?,
        definition: record.text("definition"),
        description: record.text("desc"),
        is_abstract: record.flag("abstract")?,
    })
}

fn triple_from(record: &RawRecord) -> Result<Triple, BuildError> {
    Ok(Triple::new(
        record.number("parent")?,
        record.number("relation")?,
        record.number("child")?,
    ))
}

// ============================================================================
// Linking
// ============================================================================

/// Assign every declared member to its synset and fill the member lists.
fn link_members(
    lexical_units: &mut HashMap<Id, LexicalUnit>,
    synsets: &mut HashMap<Id, Synset>,
    synset_order: &[Id],
) -> Result<(), BuildError> {
    let mut owners: HashMap<Id, Id> = HashMap::new();

    for synset_id in synset_order {
        let Some(synset) = synsets.get(synset_id) else {
            continue;
        };
        for &unit_id in &synset.unit_ids {
            if !lexical_units.contains_key(&unit_id) {
                return Err(BuildError::dangling(
                    format!("synset {}", synset_id),
                    RecordKind::LexicalUnit,
                    unit_id,
                ));
            }
            if let Some(previous) = owners.insert(unit_id, *synset_id) {
                if previous != *synset_id {
                    warn!(
                        "Lexical unit {} claimed by synsets {} and {}, keeping {}",
                        unit_id, previous, synset_id, synset_id
                    );
                }
            }
        }
    }

    for synset_id in synset_order {
        let Some(synset) = synsets.get_mut(synset_id) else {
            continue;
        };
        let mut seen = HashSet::new();
        synset.members = synset
            .unit_ids
            .iter()
            .copied()
            .filter(|unit_id| owners.get(unit_id) == Some(synset_id) && seen.insert(*unit_id))
            .collect();
    }

    for (unit_id, synset_id) in owners {
        if let Some(unit) = lexical_units.get_mut(&unit_id) {
            unit.synset_id = Some(synset_id);
        }
    }
    Ok(())
}

/// Every subject and object must resolve in the entity table, every predicate
/// in the relation-type table.
fn check_triples(
    table: RecordKind,
    triples: &[Triple],
    relation_types: &HashMap<Id, RelationType>,
    entity_exists: impl Fn(Id) -> bool,
    entity_kind: RecordKind,
) -> Result<(), BuildError> {
    for (position, triple) in triples.iter().enumerate() {
        let referrer = || format!("{} #{}", table, position);
        if !entity_exists(triple.subject) {
            return Err(BuildError::dangling(referrer(), entity_kind, triple.subject));
        }
        if !relation_types.contains_key(&triple.predicate) {
            return Err(BuildError::dangling(
                referrer(),
                RecordKind::RelationType,
                triple.predicate,
            ));
        }
        if !entity_exists(triple.object) {
            return Err(BuildError::dangling(referrer(), entity_kind, triple.object));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: Id, name: &str) -> RawRecord {
        RawRecord::new(RecordKind::LexicalUnit)
            .with("id", id.to_string())
            .with("name", name)
            .with("pos", "noun")
            .with("variant", "1")
            .with("tagcount", "0")
    }

    fn synset(id: Id, members: &str) -> RawRecord {
        RawRecord::new(RecordKind::Synset)
            .with("id", id.to_string())
            .with("split", "1")
            .with("abstract", "false")
            .with(SYNSET_UNITS_FIELD, members)
    }

    #[test]
    fn test_relation_type_fields() {
        let record = RawRecord::new(RecordKind::RelationType)
            .with("id", "10")
            .with("parent", "1")
            .with("type", "relacja leksykalna")
            .with("name", "hiperonimia")
            .with("posstr", "noun,verb")
            .with("shortcut", "hiper")
            .with("autoreverse", "true");
        let rel = relation_type_from(&record).unwrap();
        assert_eq!(rel.id, 10);
        assert_eq!(rel.parent, Some(1));
        assert_eq!(rel.reverse, None);
        assert_eq!(rel.category, "relacja leksykalna");
        assert_eq!(rel.description, "");
        assert_eq!(rel.pos.len(), 2);
        assert!(rel.autoreverse);
    }

    #[test]
    fn test_synset_optional_text_defaults() {
        let s = synset_from(&synset(5, "1,2")).unwrap();
        assert_eq!(s.definition, "");
        assert_eq!(s.description, "");
        assert_eq!(s.unit_ids, vec![1, 2]);
        assert!(s.members.is_empty());
        assert!(!s.is_abstract);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut builder = WordnetBuilder::new();
        builder.push(unit(1, "bank")).unwrap();
        let err = builder.push(unit(1, "river")).unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateId {
                kind: RecordKind::LexicalUnit,
                id: 1
            }
        );
    }

    #[test]
    fn test_same_id_different_kinds_allowed() {
        let mut builder = WordnetBuilder::new();
        builder.push(unit(1, "bank")).unwrap();
        builder.push(synset(1, "1")).unwrap();
        assert_eq!(builder.len(), 2);
        let wordnet = builder.finish().unwrap();
        assert_eq!(wordnet.lexical_unit(1).unwrap().synset_id, Some(1));
    }

    #[test]
    fn test_repeated_member_linked_once() {
        let wordnet = build([unit(1, "a"), unit(2, "b"), synset(7, "2,1,2")]).unwrap();
        assert_eq!(wordnet.synset(7).unwrap().members, vec![2, 1]);
    }

    #[test]
    fn test_contested_unit_goes_to_later_synset() {
        let wordnet = build([
            unit(1, "a"),
            unit(2, "b"),
            synset(7, "1,2"),
            synset(8, "2"),
        ])
        .unwrap();
        assert_eq!(wordnet.synset(7).unwrap().members, vec![1]);
        assert_eq!(wordnet.synset(8).unwrap().members, vec![2]);
        assert_eq!(wordnet.lexical_unit(2).unwrap().synset_id, Some(8));
    }

    #[test]
    fn test_dangling_member() {
        let err = build([unit(1, "a"), synset(7, "1,3")]).unwrap_err();
        assert_eq!(
            err,
            BuildError::DanglingReference {
                referrer: "synset 7".to_string(),
                target: RecordKind::LexicalUnit,
                id: 3
            }
        );
    }

    #[test]
    fn test_dangling_predicate() {
        let relation = RawRecord::new(RecordKind::LexicalRelation)
            .with("parent", "1")
            .with("relation", "99")
            .with("child", "1");
        let err = build([unit(1, "a"), relation]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::DanglingReference {
                target: RecordKind::RelationType,
                id: 99,
                ..
            }
        ));
        assert!(err.to_string().contains("lexical-relation #0"));
    }

    #[test]
    fn test_parse_error_message() {
        let err = build([unit(1, "a").with("variant", "one")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "lexical-unit record: malformed value 'one' for field 'variant'"
        );

        let missing = RawRecord::new(RecordKind::SynsetRelation).with("parent", "1");
        let err = build([missing]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "synset-relation record: missing required field 'relation'"
        );
    }

    #[test]
    fn test_empty_build() {
        let builder = WordnetBuilder::new();
        assert!(builder.is_empty());
        let wordnet = builder.finish().unwrap();
        assert!(wordnet.lexical_units().is_empty());
    }
}
