//! Bounded breadth-first traversal of the family graph

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::index::GraphIndex;
use crate::limits::DEFAULT_TRAVERSAL_DISTANCE;
use crate::node::GraphNode;
use crate::person::PersonId;
use crate::relation::{label, RelationKind};

/// Which edges a traversal may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "kind", rename_all = "lowercase")]
pub enum EdgeFilter {
    #[default]
    All,
    Only(RelationKind),
    Except(RelationKind),
}

impl EdgeFilter {
    pub fn allows(&self, kind: RelationKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(k) => *k == kind,
            Self::Except(k) => *k != kind,
        }
    }
}

/// Traversal query builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalQuery {
    /// Starting person
    pub start: PersonId,

    /// Furthest ring of relations to include
    #[serde(default = "default_distance")]
    pub max_distance: u32,

    #[serde(default)]
    pub filter: EdgeFilter,
}

fn default_distance() -> u32 {
    DEFAULT_TRAVERSAL_DISTANCE
}

impl TraversalQuery {
    pub fn new(start: PersonId) -> Self {
        Self {
            start,
            max_distance: default_distance(),
            filter: EdgeFilter::All,
        }
    }

    pub fn with_distance(mut self, max_distance: u32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Follow only edges of one kind
    pub fn only(mut self, kind: RelationKind) -> Self {
        self.filter = EdgeFilter::Only(kind);
        self
    }

    /// Follow every edge except one kind
    pub fn except(mut self, kind: RelationKind) -> Self {
        self.filter = EdgeFilter::Except(kind);
        self
    }
}

/// One person reached by a traversal
#[derive(Debug, Clone)]
pub struct Relationship {
    pub node: Arc<GraphNode>,

    /// e.g. "mother of father of Carol"
    pub description: String,

    /// Hops from the start; 0 is the start itself
    pub distance: u32,
}

impl Relationship {
    pub fn id(&self) -> PersonId {
        self.node.id()
    }

    pub fn view(&self) -> RelationshipView {
        RelationshipView {
            id: self.node.id(),
            name: self.node.name().to_string(),
            description: self.description.clone(),
            distance: self.distance,
        }
    }
}

/// Caller-visible, serializable form of a [`Relationship`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipView {
    pub id: PersonId,
    pub name: String,
    pub description: String,
    pub distance: u32,
}

/// Traversal statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStats {
    pub nodes_visited: usize,
    pub edges_considered: usize,
    pub max_distance_reached: u32,
}

/// Result of a traversal
#[derive(Debug, Clone, Default)]
pub struct TraversalResult {
    /// Reached persons in discovery order, start first
    pub relationships: Vec<Relationship>,
    pub stats: TraversalStats,
}

/// Graph traversal engine
pub struct TraversalEngine;

impl TraversalEngine {
    /// Execute a traversal query. An unknown start yields an empty result.
    pub fn execute(query: &TraversalQuery, index: &GraphIndex) -> TraversalResult {
        let start = index.get(&query.start);
        let result = Self::traverse(start, query.max_distance, query.filter, index);

        tracing::debug!(
            "Traversal from {} ({:?}, max {}) reached {} persons over {} edges",
            query.start,
            query.filter,
            query.max_distance,
            result.relationships.len(),
            result.stats.edges_considered
        );
        result
    }

    /// Breadth-first search from `start`, following edges `filter` allows,
    /// out to `max_distance` hops.
    ///
    /// Each node appears at most once, at its shortest distance; ties go to
    /// whichever path was discovered first. Every node is read from the index
    /// with its own short lookup, so no lock is held across the traversal.
    pub fn traverse(
        start: Option<Arc<GraphNode>>,
        max_distance: u32,
        filter: EdgeFilter,
        index: &GraphIndex,
    ) -> TraversalResult {
        let Some(start) = start else {
            return TraversalResult::default();
        };

        let mut stats = TraversalStats::default();
        let mut seen: HashSet<PersonId> = HashSet::new();
        let mut queue: VecDeque<usize> = VecDeque::new();
        let mut relationships = vec![Relationship {
            description: start.name().to_string(),
            node: start,
            distance: 0,
        }];

        seen.insert(relationships[0].id());
        queue.push_back(0);

        while let Some(position) = queue.pop_front() {
            let current = relationships[position].clone();
            let distance = current.distance + 1;
            if distance > max_distance {
                break;
            }
            stats.nodes_visited += 1;

            for edge in current.node.edges().iter().filter(|e| filter.allows(e.kind)) {
                stats.edges_considered += 1;
                if seen.contains(&edge.target) {
                    continue;
                }
                // only a deleted person's node can be missing here
                let Some(target) = index.get(&edge.target) else {
                    continue;
                };

                let description = format!(
                    "{} of {}",
                    label(edge.kind, target.gender()),
                    current.description
                );
                seen.insert(edge.target);
                stats.max_distance_reached = distance;
                relationships.push(Relationship {
                    node: target,
                    description,
                    distance,
                });
                queue.push_back(relationships.len() - 1);
            }
        }

        TraversalResult {
            relationships,
            stats,
        }
    }

    /// Parents, their parents, and so on
    pub fn ancestors(index: &GraphIndex, start: &PersonId, max_distance: u32) -> Vec<Relationship> {
        let query = TraversalQuery::new(*start)
            .with_distance(max_distance)
            .only(RelationKind::Parent);
        Self::execute(&query, index).relationships
    }

    /// Children, their children, and so on
    pub fn descendants(index: &GraphIndex, start: &PersonId, max_distance: u32) -> Vec<Relationship> {
        let query = TraversalQuery::new(*start)
            .with_distance(max_distance)
            .only(RelationKind::Child);
        Self::execute(&query, index).relationships
    }

    /// Directly listed siblings, without the start person
    pub fn siblings(index: &GraphIndex, start: &PersonId) -> Vec<Relationship> {
        let query = TraversalQuery::new(*start)
            .with_distance(1)
            .only(RelationKind::Sibling);
        let mut siblings = Self::execute(&query, index).relationships;
        siblings.retain(|r| r.distance != 0);
        siblings
    }

    /// Relatives of every kind, marriage included
    pub fn close_relatives_including_marriage(
        index: &GraphIndex,
        start: &PersonId,
        max_distance: u32,
    ) -> Vec<Relationship> {
        let query = TraversalQuery::new(*start).with_distance(max_distance);
        Self::execute(&query, index).relationships
    }

    /// Relatives reachable without crossing a marriage
    pub fn close_relatives_excluding_marriage(
        index: &GraphIndex,
        start: &PersonId,
        max_distance: u32,
    ) -> Vec<Relationship> {
        let query = TraversalQuery::new(*start)
            .with_distance(max_distance)
            .except(RelationKind::Spouse);
        Self::execute(&query, index).relationships
    }

    /// Close relatives (marriage included) that are neither ancestors nor
    /// descendants, ordered by distance.
    pub fn other_relatives(
        index: &GraphIndex,
        start: &PersonId,
        max_distance: u32,
    ) -> Vec<Relationship> {
        let lineal: HashSet<PersonId> = Self::ancestors(index, start, max_distance)
            .iter()
            .chain(Self::descendants(index, start, max_distance).iter())
            .map(Relationship::id)
            .collect();

        let mut others: Vec<Relationship> =
            Self::close_relatives_including_marriage(index, start, max_distance)
                .into_iter()
                .filter(|r| !lineal.contains(&r.id()))
                .collect();
        others.sort_by_key(|r| r.distance);
        others
    }
}

/// Group relationships into rings by distance, leaving out the start person
pub fn group_by_distance(relationships: &[Relationship]) -> BTreeMap<u32, Vec<Relationship>> {
    let mut rings: BTreeMap<u32, Vec<Relationship>> = BTreeMap::new();
    for relationship in relationships.iter().filter(|r| r.distance != 0) {
        rings
            .entry(relationship.distance)
            .or_default()
            .push(relationship.clone());
    }
    rings
}
