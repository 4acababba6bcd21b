//! The shared, concurrently readable map of person id to graph node

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::node::GraphNode;
use crate::person::PersonId;
use crate::relation::RelationKind;

/// Node and edge counts of an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub nodes: usize,
    pub edges: usize,
    pub edges_by_kind: BTreeMap<RelationKind, usize>,
}

/// All published nodes, keyed by person id
///
/// Readers take the lock only long enough to clone an `Arc` out of the map.
/// Writers swap whole nodes (or the whole map) in a single write section, so
/// a reader never sees a partially rebuilt edge list.
#[derive(Debug, Default)]
pub struct GraphIndex {
    nodes: RwLock<HashMap<PersonId, Arc<GraphNode>>>,
}

impl GraphIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &PersonId) -> Option<Arc<GraphNode>> {
        self.nodes.read().get(id).cloned()
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.nodes.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }

    /// Point-in-time copy of every published node
    pub fn snapshot(&self) -> Vec<Arc<GraphNode>> {
        self.nodes.read().values().cloned().collect()
    }

    /// Ids of the nodes holding at least one edge to `target`, in id order
    pub fn referrers_of(&self, target: &PersonId) -> Vec<PersonId> {
        let mut referrers: Vec<PersonId> = self
            .nodes
            .read()
            .values()
            .filter(|node| node.edges().iter().any(|edge| edge.target == *target))
            .map(|node| node.id())
            .collect();
        referrers.sort();
        referrers
    }

    /// Every (source, kind, target) triple in the index
    pub fn edge_triples(&self) -> BTreeSet<(PersonId, RelationKind, PersonId)> {
        let nodes = self.nodes.read();
        nodes
            .values()
            .flat_map(|node| node.edges().iter().map(move |e| (node.id(), e.kind, e.target)))
            .collect()
    }

    /// Edge targets with no node in the index
    pub fn dangling_targets(&self) -> Vec<PersonId> {
        let nodes = self.nodes.read();
        nodes
            .values()
            .flat_map(|node| node.edges().iter().map(|e| e.target))
            .filter(|target| !nodes.contains_key(target))
            .collect()
    }

    pub fn stats(&self) -> IndexStats {
        let nodes = self.nodes.read();
        let mut stats = IndexStats {
            nodes: nodes.len(),
            ..Default::default()
        };
        for node in nodes.values() {
            for edge in node.edges() {
                stats.edges += 1;
                *stats.edges_by_kind.entry(edge.kind).or_insert(0) += 1;
            }
        }
        stats
    }

    /// Replace the entire contents with a freshly built map
    pub(crate) fn replace_all(&self, built: HashMap<PersonId, GraphNode>) {
        let fresh: HashMap<PersonId, Arc<GraphNode>> = built
            .into_iter()
            .map(|(id, node)| (id, Arc::new(node)))
            .collect();
        *self.nodes.write() = fresh;
    }

    /// Remove `removed` and publish `staged` in one write section
    pub(crate) fn apply_scoped(
        &self,
        removed: &HashSet<PersonId>,
        staged: HashMap<PersonId, GraphNode>,
    ) {
        let staged: Vec<(PersonId, Arc<GraphNode>)> = staged
            .into_iter()
            .map(|(id, node)| (id, Arc::new(node)))
            .collect();

        let mut nodes = self.nodes.write();
        for id in removed {
            nodes.remove(id);
        }
        nodes.extend(staged);
    }
}
