//! Query engine behavior over built graphs.

mod common;

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::thread;

use plwordnet_core::{
    build, BuildError, Id, LexicalUnit, QueryError, RawRecord, RecordKind, RelationTable, Triple,
    TriplePattern, Wordnet, SYNSET_UNITS_FIELD,
};
use pretty_assertions::assert_eq;

use common::load_mini;

const BANK: Id = 1;
const RIVER: Id = 2;
const HYPER: Id = 10;
const MISSING: Id = 999_999;
const LARGE: Id = 5;
const SMALL: Id = 6;
const ANTONYMY_SUBTYPE: Id = 21;

type UnitPattern = TriplePattern<LexicalUnit>;

fn unit(id: Id, name: &str) -> RawRecord {
    RawRecord::new(RecordKind::LexicalUnit)
        .with("id", id.to_string())
        .with("name", name)
        .with("variant", "1")
        .with("tagcount", "0")
}

fn synset(id: Id, members: &str) -> RawRecord {
    RawRecord::new(RecordKind::Synset)
        .with("id", id.to_string())
        .with("split", "1")
        .with(SYNSET_UNITS_FIELD, members)
}

fn scenario() -> Wordnet {
    build([
        unit(BANK, "bank"),
        unit(RIVER, "river"),
        RawRecord::new(RecordKind::RelationType)
            .with("id", HYPER.to_string())
            .with("shortcut", "hyper"),
        synset(100, "1"),
        RawRecord::new(RecordKind::LexicalRelation)
            .with("parent", "1")
            .with("relation", "10")
            .with("child", "2"),
    ])
    .unwrap()
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_bank_river_scenario() {
    let wordnet = scenario();

    let hits = wordnet
        .lexical_relations_where(TriplePattern::new().subject(BANK))
        .unwrap();
    assert_eq!(hits.len(), 1);
    let hit = hits.iter().next().unwrap();
    assert_eq!(hit.subject.name, "bank");
    assert_eq!(hit.predicate.shortcut, "hyper");
    assert_eq!(hit.object.name, "river");

    let lemmas: Vec<Id> = wordnet.lemmas("bank").iter().map(|u| u.id).collect();
    assert_eq!(lemmas, vec![BANK]);

    let reverse = wordnet
        .lexical_relations_where(TriplePattern::new().object(BANK))
        .unwrap();
    assert!(reverse.is_empty());
}

#[test]
fn test_entity_and_id_terms_agree() {
    let wordnet = scenario();
    let bank = wordnet.lexical_unit(BANK).unwrap();
    let hyper = wordnet.relation_type(HYPER).unwrap();

    let by_entity = wordnet
        .lexical_relations_where(TriplePattern::new().subject(bank).predicate(hyper))
        .unwrap();
    let by_id = wordnet
        .lexical_relations_where(TriplePattern::new().subject(BANK).predicate(HYPER))
        .unwrap();
    assert_eq!(by_entity, by_id);
}

// ============================================================================
// Pattern properties over the fixture
// ============================================================================

#[test]
fn test_every_triple_matches_its_exact_pattern() {
    let wordnet = load_mini();
    let triples: Vec<Triple> = wordnet.lexical_relations().iter().copied().collect();
    assert!(!triples.is_empty());

    for t in triples {
        let exact = UnitPattern::from_ids(Some(t.subject), Some(t.predicate), Some(t.object));
        let hits = wordnet.query(RelationTable::Lexical, &exact).unwrap();
        assert!(hits.contains(&t), "{:?} missing from its own pattern", t);

        for changed in [
            UnitPattern::from_ids(Some(MISSING), Some(t.predicate), Some(t.object)),
            UnitPattern::from_ids(Some(t.subject), Some(MISSING), Some(t.object)),
            UnitPattern::from_ids(Some(t.subject), Some(t.predicate), Some(MISSING)),
        ] {
            let hits = wordnet.query(RelationTable::Lexical, &changed).unwrap();
            assert!(!hits.contains(&t));
        }
    }
}

#[test]
fn test_swapped_in_indexed_id_excludes_triple() {
    let wordnet = load_mini();
    let triples: Vec<Triple> = wordnet.lexical_relations().iter().copied().collect();
    let subjects: BTreeSet<Id> = triples.iter().map(|t| t.subject).collect();
    let predicates: BTreeSet<Id> = triples.iter().map(|t| t.predicate).collect();
    let objects: BTreeSet<Id> = triples.iter().map(|t| t.object).collect();

    for t in &triples {
        let mut variants = Vec::new();
        for &s in subjects.iter().filter(|&&s| s != t.subject) {
            variants.push(Triple::new(s, t.predicate, t.object));
        }
        for &p in predicates.iter().filter(|&&p| p != t.predicate) {
            variants.push(Triple::new(t.subject, p, t.object));
        }
        for &o in objects.iter().filter(|&&o| o != t.object) {
            variants.push(Triple::new(t.subject, t.predicate, o));
        }

        for v in variants {
            let pattern =
                UnitPattern::from_ids(Some(v.subject), Some(v.predicate), Some(v.object));
            let hits = wordnet.query(RelationTable::Lexical, &pattern).unwrap();
            let expected: HashSet<Triple> =
                triples.iter().copied().filter(|candidate| *candidate == v).collect();
            assert!(!hits.contains(t), "{:?} matched {:?}", t, v);
            assert_eq!(hits, expected);
        }
    }
}

#[test]
fn test_antonym_subtype_does_not_match_parent_type() {
    let wordnet = load_mini();
    let pattern = UnitPattern::new().subject(LARGE).predicate(ANTONYMY_SUBTYPE);
    let hits = wordnet.query(RelationTable::Lexical, &pattern).unwrap();
    let expected: HashSet<Triple> = [Triple::new(LARGE, ANTONYMY_SUBTYPE, SMALL)]
        .into_iter()
        .collect();
    assert_eq!(hits, expected);

    let pattern = UnitPattern::new().predicate(ANTONYMY_SUBTYPE).object(LARGE);
    assert!(wordnet
        .query(RelationTable::Lexical, &pattern)
        .unwrap()
        .is_empty());
}

#[test]
fn test_every_synset_triple_resolves() {
    let wordnet = load_mini();
    for t in wordnet.synset_relations().iter() {
        let hits = wordnet
            .synset_relations_where(TriplePattern::new().subject(t.subject).object(t.object))
            .unwrap();
        let found: HashSet<Triple> = hits.iter().map(|r| r.triple()).collect();
        assert!(found.contains(t));
    }
}

#[test]
fn test_partial_patterns_are_conjunctive() {
    let wordnet = load_mini();
    let antonymy: Id = 20;
    let large: Id = 5;

    let by_subject = wordnet
        .lexical_relations_where(TriplePattern::new().subject(large))
        .unwrap();
    assert_eq!(by_subject.len(), 2);

    let both = wordnet
        .lexical_relations_where(TriplePattern::new().subject(large).predicate(antonymy))
        .unwrap();
    let triples: Vec<Triple> = both.iter().map(|r| r.triple()).collect();
    assert_eq!(triples, vec![Triple::new(5, 20, 6)]);
}

#[test]
fn test_unconstrained_query_fails() {
    let wordnet = load_mini();
    let err = wordnet
        .synset_relations_where(TriplePattern::new())
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::Unconstrained {
            table: RelationTable::Synset
        }
    );
    assert!(err.to_string().starts_with("synset-relations query"));
}

#[test]
fn test_absent_id_yields_empty_set() {
    let wordnet = load_mini();
    for pattern in [
        TriplePattern::new().subject(MISSING),
        TriplePattern::new().predicate(MISSING),
        TriplePattern::new().object(MISSING),
    ] {
        assert!(wordnet.lexical_relations_where(pattern).unwrap().is_empty());
    }
}

// ============================================================================
// Linking invariants
// ============================================================================

#[test]
fn test_linked_units_appear_once_in_owner() {
    let wordnet = build([
        unit(1, "a"),
        unit(2, "b"),
        unit(3, "c"),
        synset(100, "1,2,1"),
        synset(101, "3,2"),
    ])
    .unwrap();

    for lu in wordnet.lexical_units().values() {
        let Some(owner) = wordnet.synset_of(lu) else {
            continue;
        };
        let occurrences = owner.members.iter().filter(|&&id| id == lu.id).count();
        assert_eq!(occurrences, 1, "unit {} in synset {}", lu.id, owner.id);
    }

    // the later synset keeps a contested unit
    assert_eq!(wordnet.synset(100).unwrap().members, vec![1]);
    assert_eq!(wordnet.synset(101).unwrap().members, vec![3, 2]);
}

#[test]
fn test_duplicate_unit_id_fails() {
    let err = build([unit(1, "a"), unit(1, "b")]).unwrap_err();
    assert_eq!(
        err,
        BuildError::DuplicateId {
            kind: RecordKind::LexicalUnit,
            id: 1
        }
    );
}

#[test]
fn test_synset_with_missing_member_fails() {
    let err = build([unit(1, "a"), synset(100, "1,42")]).unwrap_err();
    assert!(matches!(
        err,
        BuildError::DanglingReference {
            target: RecordKind::LexicalUnit,
            id: 42,
            ..
        }
    ));
}

// ============================================================================
// Sharing
// ============================================================================

#[test]
fn test_wordnet_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Wordnet>();

    let wordnet = Arc::new(load_mini());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let wordnet = Arc::clone(&wordnet);
            thread::spawn(move || wordnet.lemmas("pies").len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
