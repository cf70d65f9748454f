//! Role-keyed triple index
//!
//! Each relation table keeps its triples in an ordered vector; positions in
//! that vector are stable for the lifetime of the graph. The index maps an
//! entity id to the set of positions where the id plays a given role, so a
//! pattern lookup is a handful of set probes instead of a table scan.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{Id, Triple};

/// Position of a triple within its table.
pub type Position = usize;

/// Role an id plays inside a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Subject,
    Predicate,
    Object,
}

impl Role {
    fn of(&self, triple: &Triple) -> Id {
        match self {
            Role::Subject => triple.subject,
            Role::Predicate => triple.predicate,
            Role::Object => triple.object,
        }
    }
}

/// Per-role position sets for one relation table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleIndex {
    by_subject: HashMap<Id, HashSet<Position>>,
    by_predicate: HashMap<Id, HashSet<Position>>,
    by_object: HashMap<Id, HashSet<Position>>,
}

impl TripleIndex {
    /// Index every triple of a table.
    pub fn build(triples: &[Triple]) -> Self {
        let mut index = Self::default();
        for (position, triple) in triples.iter().enumerate() {
            for role in [Role::Subject, Role::Predicate, Role::Object] {
                index
                    .role_map_mut(role)
                    .entry(role.of(triple))
                    .or_default()
                    .insert(position);
            }
        }
        index
    }

    /// Positions where `id` plays `role`, if any.
    pub fn positions(&self, role: Role, id: Id) -> Option<&HashSet<Position>> {
        self.role_map(role).get(&id)
    }

    /// Number of distinct ids seen in `role`
    pub fn distinct(&self, role: Role) -> usize {
        self.role_map(role).len()
    }

    /// Intersect the position sets of every given constraint.
    ///
    /// Starts from the smallest set and probes the others. An id missing from
    /// its role map short-circuits to an empty result. Callers must pass at
    /// least one constraint.
    pub fn matching(&self, constraints: &[(Role, Id)]) -> HashSet<Position> {
        let mut sets = Vec::with_capacity(constraints.len());
        for &(role, id) in constraints {
            match self.positions(role, id) {
                Some(set) => sets.push(set),
                None => return HashSet::new(),
            }
        }
        sets.sort_by_key(|set| set.len());

        let Some((smallest, rest)) = sets.split_first() else {
            return HashSet::new();
        };
        smallest
            .iter()
            .copied()
            .filter(|position| rest.iter().all(|set| set.contains(position)))
            .collect()
    }

    fn role_map(&self, role: Role) -> &HashMap<Id, HashSet<Position>> {
        match role {
            Role::Subject => &self.by_subject,
            Role::Predicate => &self.by_predicate,
            Role::Object => &self.by_object,
        }
    }

    fn role_map_mut(&mut self, role: Role) -> &mut HashMap<Id, HashSet<Position>> {
        match role {
            Role::Subject => &mut self.by_subject,
            Role::Predicate => &mut self.by_predicate,
            Role::Object => &mut self.by_object,
        }
    }
}

/// An ordered relation table together with its index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleTable {
    triples: Vec<Triple>,
    index: TripleIndex,
}

impl TripleTable {
    /// Freeze a list of triples into an indexed table.
    pub fn new(triples: Vec<Triple>) -> Self {
        let index = TripleIndex::build(&triples);
        Self { triples, index }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn index(&self) -> &TripleIndex {
        &self.index
    }

    /// Triples satisfying every constraint.
    pub fn matching(&self, constraints: &[(Role, Id)]) -> impl Iterator<Item = &Triple> {
        self.index
            .matching(constraints)
            .into_iter()
            .filter_map(|position| self.triples.get(position))
    }
}
