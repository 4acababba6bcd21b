//! Kinship Core - Family relationship graph engine
//!
//! This crate turns person records with free-text relation fields into a
//! concurrently readable graph, and answers bounded relationship queries
//! (ancestors, descendants, siblings, close relatives) over it.

pub mod builder;
pub mod error;
pub mod extract;
pub mod index;
pub mod limits;
pub mod node;
pub mod person;
pub mod relation;
pub mod traversal;

pub use builder::{GraphBuilder, NodeStaging};
pub use error::{Error, Result};
pub use extract::{Anchor, RegexAnchorExtractor, RelationLinkExtractor, PERSON_HREF_PREFIX};
pub use index::{GraphIndex, IndexStats};
pub use limits::{ValidationError, DEFAULT_TRAVERSAL_DISTANCE, MAX_TRAVERSAL_DISTANCE};
pub use node::{Edge, GraphNode};
pub use person::{Gender, PersonId, PersonRecord, PersonRecords};
pub use relation::{label, RelationKind};
pub use traversal::{
    group_by_distance, EdgeFilter, Relationship, RelationshipView, TraversalEngine, TraversalQuery,
    TraversalResult, TraversalStats,
};
