//! Graph nodes and edges

use serde::{Deserialize, Serialize};

use crate::person::{Gender, PersonId};
use crate::relation::RelationKind;

/// A directed, kind-tagged link from one node to another
///
/// The edge is asserted by the source node's own record. No reciprocal edge
/// is ever inferred for the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub kind: RelationKind,
    pub target: PersonId,
}

impl Edge {
    pub fn new(kind: RelationKind, target: PersonId) -> Self {
        Self { kind, target }
    }
}

/// One person in the family graph (a node)
///
/// Published nodes are shared behind `Arc` and never mutated; a rebuild
/// replaces the whole node, so a reader holding one always sees a complete
/// edge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    id: PersonId,
    name: String,
    gender: Gender,
    edges: Vec<Edge>,
}

impl GraphNode {
    /// Create a node with no edges
    pub fn new(id: PersonId, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id,
            name: name.into(),
            gender,
            edges: Vec::new(),
        }
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Outward edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Targets of the edges of one kind
    pub fn targets(&self, kind: RelationKind) -> impl Iterator<Item = PersonId> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.target)
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }
}

impl std::fmt::Display for GraphNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
