//! Builds graph nodes from person records
//!
//! Every rebuild stages its nodes aside and publishes them into the
//! [`GraphIndex`] in one step. A failure while processing any record abandons
//! the rebuild before anything is published.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::extract::{RegexAnchorExtractor, RelationLinkExtractor};
use crate::index::GraphIndex;
use crate::limits::validate_relation_field;
use crate::node::{Edge, GraphNode};
use crate::person::{Gender, PersonId, PersonRecord, PersonRecords};

/// Nodes being built for one rebuild, not yet visible to readers
pub struct NodeStaging<'a> {
    nodes: HashMap<PersonId, GraphNode>,
    live: Option<&'a GraphIndex>,
    replaced: HashSet<PersonId>,
}

impl<'a> NodeStaging<'a> {
    /// Staging for a full rebuild: nothing from the live index is reused
    pub fn fresh() -> Self {
        Self {
            nodes: HashMap::new(),
            live: None,
            replaced: HashSet::new(),
        }
    }

    /// Staging for a scoped rebuild: live nodes outside `replaced` are reused
    /// as edge targets and left alone.
    pub fn scoped(live: &'a GraphIndex, replaced: HashSet<PersonId>) -> Self {
        Self {
            nodes: HashMap::new(),
            live: Some(live),
            replaced,
        }
    }

    /// The staged node for `id`, created with no edges if absent
    pub fn get_or_create(&mut self, id: PersonId, name: &str, gender: Gender) -> &mut GraphNode {
        self.nodes
            .entry(id)
            .or_insert_with(|| GraphNode::new(id, name, gender))
    }

    pub fn get(&self, id: &PersonId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Make sure an edge to `record` will not dangle once published
    fn ensure_target(&mut self, record: &PersonRecord) {
        if self.nodes.contains_key(&record.id) {
            return;
        }
        if let Some(live) = self.live {
            if !self.replaced.contains(&record.id) && live.contains(&record.id) {
                return;
            }
        }
        self.get_or_create(record.id, &record.name, record.gender);
    }

    fn into_parts(self) -> (HashMap<PersonId, GraphNode>, HashSet<PersonId>) {
        (self.nodes, self.replaced)
    }
}

/// Parses relation fields and turns them into graph nodes
pub struct GraphBuilder<E = RegexAnchorExtractor> {
    extractor: E,
}

impl GraphBuilder<RegexAnchorExtractor> {
    pub fn new() -> Self {
        Self::with_extractor(RegexAnchorExtractor::new())
    }
}

impl Default for GraphBuilder<RegexAnchorExtractor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RelationLinkExtractor> GraphBuilder<E> {
    pub fn with_extractor(extractor: E) -> Self {
        Self { extractor }
    }

    /// Build the node for `record` with every edge its relation fields assert.
    ///
    /// Anchors that do not name a known record are dropped without error.
    pub fn build_connections<'s>(
        &self,
        record: &PersonRecord,
        records: &PersonRecords,
        staging: &'s mut NodeStaging<'_>,
    ) -> Result<&'s GraphNode> {
        let edges = self
            .resolve_edges(record, records, staging)
            .map_err(|e| Error::record(record.id, &record.name, e))?;

        let node = staging.get_or_create(record.id, &record.name, record.gender);
        for edge in edges {
            node.push_edge(edge);
        }
        Ok(&*node)
    }

    fn resolve_edges(
        &self,
        record: &PersonRecord,
        records: &PersonRecords,
        staging: &mut NodeStaging<'_>,
    ) -> Result<Vec<Edge>> {
        let mut edges = Vec::new();

        for (kind, text) in record.relation_fields() {
            validate_relation_field(text)?;

            for anchor in self.extractor.extract_anchors(text)? {
                let Some(target) = anchor.person_id().and_then(|id| records.get(&id)) else {
                    tracing::trace!(
                        person_id = %record.id,
                        href = %anchor.href,
                        "Skipping unresolved {} reference",
                        kind
                    );
                    continue;
                };
                staging.ensure_target(target);
                edges.push(Edge::new(kind, target.id));
            }
        }

        Ok(edges)
    }

    /// Ids a scoped rebuild of `record` touches: the record itself plus every
    /// id its relation fields reference, in discovery order.
    pub fn scope_of(&self, record: &PersonRecord) -> Result<Vec<PersonId>> {
        let mut scope = vec![record.id];
        let mut seen: HashSet<PersonId> = scope.iter().copied().collect();

        for (_, text) in record.relation_fields() {
            let anchors = validate_relation_field(text)
                .map_err(Error::from)
                .and_then(|_| self.extractor.extract_anchors(text))
                .map_err(|e| Error::record(record.id, &record.name, e))?;

            for id in anchors.iter().filter_map(|a| a.person_id()) {
                if seen.insert(id) {
                    scope.push(id);
                }
            }
        }

        Ok(scope)
    }

    /// Rebuild the whole index from `records`.
    ///
    /// The new graph is built aside and swapped in only if every record was
    /// processed; otherwise the previous index stays authoritative.
    pub fn build_full(&self, records: &PersonRecords, index: &GraphIndex) -> Result<usize> {
        let mut staging = NodeStaging::fresh();

        for record in records.iter() {
            if let Err(e) = self.build_connections(record, records, &mut staging) {
                tracing::error!(
                    person_id = %record.id,
                    person_name = %record.name,
                    "Abandoning full rebuild: {}",
                    e
                );
                return Err(e);
            }
        }

        let built = staging.len();
        let (nodes, _) = staging.into_parts();
        index.replace_all(nodes);
        tracing::debug!("Full rebuild published {} nodes", built);
        Ok(built)
    }

    /// Rebuild `changed` and the persons it directly references.
    ///
    /// Nodes outside that set keep their edge lists untouched.
    pub fn rebuild_scoped(
        &self,
        changed: &PersonRecord,
        records: &PersonRecords,
        index: &GraphIndex,
    ) -> Result<usize> {
        let scope = match self.scope_of(changed) {
            Ok(scope) => scope,
            Err(e) => {
                tracing::error!(
                    person_id = %changed.id,
                    person_name = %changed.name,
                    "Abandoning scoped rebuild: {}",
                    e
                );
                return Err(e);
            }
        };
        self.rebuild_ids(scope, records, index)
    }

    /// Scoped rebuild for a person whose record is gone: the node is dropped
    /// and the persons it pointed at are rebuilt from their current records.
    ///
    /// Persons that still link to the removed id without being linked back
    /// are rebuilt too, so no published edge is left pointing at it.
    pub fn rebuild_removed(
        &self,
        id: PersonId,
        records: &PersonRecords,
        index: &GraphIndex,
    ) -> Result<usize> {
        let mut scope = vec![id];
        if let Some(node) = index.get(&id) {
            for edge in node.edges() {
                if !scope.contains(&edge.target) {
                    scope.push(edge.target);
                }
            }
        }
        for referrer in index.referrers_of(&id) {
            if !scope.contains(&referrer) {
                scope.push(referrer);
            }
        }
        self.rebuild_ids(scope, records, index)
    }

    fn rebuild_ids(
        &self,
        scope: Vec<PersonId>,
        records: &PersonRecords,
        index: &GraphIndex,
    ) -> Result<usize> {
        let replaced: HashSet<PersonId> = scope.iter().copied().collect();
        let mut staging = NodeStaging::scoped(index, replaced);

        for id in &scope {
            let Some(record) = records.get(id) else {
                continue;
            };
            if let Err(e) = self.build_connections(record, records, &mut staging) {
                tracing::error!(
                    person_id = %record.id,
                    person_name = %record.name,
                    "Abandoning scoped rebuild: {}",
                    e
                );
                return Err(e);
            }
        }

        let built = staging.len();
        let (nodes, replaced) = staging.into_parts();
        index.apply_scoped(&replaced, nodes);
        tracing::debug!(
            "Scoped rebuild replaced {} ids, published {} nodes",
            replaced.len(),
            built
        );
        Ok(built)
    }
}
