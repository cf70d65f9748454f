//! Triple-pattern queries
//!
//! Patterns constrain any subset of subject, predicate and object. Every
//! constraint is normalized to an id once, looked up in the matching role
//! index, and the position sets are intersected smallest-first.
//!
//! ```ignore
//! let hits = wordnet.lexical_relations_where(
//!     TriplePattern::new().subject(&unit).predicate(hyponymy_id),
//! )?;
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use thiserror::Error;

use crate::index::{Role, TripleTable};
use crate::model::{Entity, Id, LexicalUnit, RelationType, Synset, Triple};
use crate::wordnet::Wordnet;

// ============================================================================
// Errors
// ============================================================================

/// Errors returned by pattern queries. They never affect graph state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// No subject, predicate or object was given
    #[error("{table} query needs at least one of subject, predicate or object")]
    Unconstrained { table: RelationTable },
}

/// The two relation tables of a wordnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationTable {
    /// Relations between lexical units
    Lexical,
    /// Relations between synsets
    Synset,
}

impl RelationTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationTable::Lexical => "lexical-relations",
            RelationTable::Synset => "synset-relations",
        }
    }
}

impl fmt::Display for RelationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Terms and patterns
// ============================================================================

/// A query argument: a raw id or a reference to an entity of kind `E`.
pub struct Term<E> {
    id: Id,
    kind: PhantomData<fn() -> E>,
}

impl<E> Term<E> {
    pub fn id(&self) -> Id {
        self.id
    }
}

impl<E> Clone for Term<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Term<E> {}

impl<E> fmt::Debug for Term<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Term").field(&self.id).finish()
    }
}

impl<E> From<Id> for Term<E> {
    fn from(id: Id) -> Self {
        Self {
            id,
            kind: PhantomData,
        }
    }
}

impl<E: Entity> From<&E> for Term<E> {
    fn from(entity: &E) -> Self {
        Self::from(entity.id())
    }
}

/// Subject/predicate/object constraints over a table of `E` entities.
pub struct TriplePattern<E> {
    subject: Option<Id>,
    predicate: Option<Id>,
    object: Option<Id>,
    kind: PhantomData<fn() -> E>,
}

impl<E> Default for TriplePattern<E> {
    fn default() -> Self {
        Self {
            subject: None,
            predicate: None,
            object: None,
            kind: PhantomData,
        }
    }
}

impl<E> Clone for TriplePattern<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for TriplePattern<E> {}

impl<E> fmt::Debug for TriplePattern<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriplePattern")
            .field("subject", &self.subject)
            .field("predicate", &self.predicate)
            .field("object", &self.object)
            .finish()
    }
}

impl<E> TriplePattern<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, term: impl Into<Term<E>>) -> Self {
        self.subject = Some(term.into().id());
        self
    }

    pub fn predicate(mut self, term: impl Into<Term<RelationType>>) -> Self {
        self.predicate = Some(term.into().id());
        self
    }

    pub fn object(mut self, term: impl Into<Term<E>>) -> Self {
        self.object = Some(term.into().id());
        self
    }

    /// Set any combination of roles from raw ids
    pub fn from_ids(subject: Option<Id>, predicate: Option<Id>, object: Option<Id>) -> Self {
        Self {
            subject,
            predicate,
            object,
            kind: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }

    fn constraints(&self) -> Vec<(Role, Id)> {
        [
            (Role::Subject, self.subject),
            (Role::Predicate, self.predicate),
            (Role::Object, self.object),
        ]
        .into_iter()
        .filter_map(|(role, id)| id.map(|id| (role, id)))
        .collect()
    }
}

// ============================================================================
// Results
// ============================================================================

/// A triple resolved to its entities.
///
/// Equality and hashing go by the `(subject, predicate, object)` ids.
#[derive(Debug)]
pub struct Relation<'a, E> {
    pub subject: &'a E,
    pub predicate: &'a RelationType,
    pub object: &'a E,
}

/// Relation between two lexical units
pub type LexicalRelation<'a> = Relation<'a, LexicalUnit>;

/// Relation between two synsets
pub type SynsetRelation<'a> = Relation<'a, Synset>;

impl<E: Entity> Relation<'_, E> {
    pub fn triple(&self) -> Triple {
        Triple::new(self.subject.id(), self.predicate.id, self.object.id())
    }
}

impl<E> Clone for Relation<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Relation<'_, E> {}

impl<E: Entity> PartialEq for Relation<'_, E> {
    fn eq(&self, other: &Self) -> bool {
        self.triple() == other.triple()
    }
}

impl<E: Entity> Eq for Relation<'_, E> {}

impl<E: Entity> Hash for Relation<'_, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triple().hash(state);
    }
}

// ============================================================================
// Query engine
// ============================================================================

impl Wordnet {
    /// Raw triples of `table` matching the pattern.
    pub fn query<E>(
        &self,
        table: RelationTable,
        pattern: &TriplePattern<E>,
    ) -> Result<HashSet<Triple>, QueryError> {
        if pattern.is_empty() {
            return Err(QueryError::Unconstrained { table });
        }
        let triples = self.table(table);
        Ok(triples.matching(&pattern.constraints()).copied().collect())
    }

    /// Lexical relations matching the pattern, resolved to units.
    pub fn lexical_relations_where(
        &self,
        pattern: TriplePattern<LexicalUnit>,
    ) -> Result<HashSet<LexicalRelation<'_>>, QueryError> {
        let triples = self.query(RelationTable::Lexical, &pattern)?;
        Ok(self.resolve(triples, self.lexical_units()))
    }

    /// Synset relations matching the pattern, resolved to synsets.
    pub fn synset_relations_where(
        &self,
        pattern: TriplePattern<Synset>,
    ) -> Result<HashSet<SynsetRelation<'_>>, QueryError> {
        let triples = self.query(RelationTable::Synset, &pattern)?;
        Ok(self.resolve(triples, self.synsets()))
    }

    /// All units whose name is exactly `name`.
    pub fn lemmas(&self, name: &str) -> HashSet<&LexicalUnit> {
        self.lemma_ids(name)
            .into_iter()
            .flatten()
            .filter_map(|id| self.lexical_unit(*id))
            .collect()
    }

    fn table(&self, table: RelationTable) -> &TripleTable {
        match table {
            RelationTable::Lexical => self.lexical_relations(),
            RelationTable::Synset => self.synset_relations(),
        }
    }

    fn resolve<'a, E: Entity>(
        &'a self,
        triples: HashSet<Triple>,
        entities: &'a HashMap<Id, E>,
    ) -> HashSet<Relation<'a, E>> {
        triples
            .into_iter()
            .filter_map(|triple| {
                Some(Relation {
                    subject: entities.get(&triple.subject)?,
                    predicate: self.relation_type(triple.predicate)?,
                    object: entities.get(&triple.object)?,
                })
            })
            .collect()
    }
}
