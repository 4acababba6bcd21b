//! Kinship Service - The family graph kept current behind a rebuild queue
//!
//! Queries read the shared index directly and never wait on a rebuild.
//! Rebuilds are submitted to a single worker and run one at a time, in the
//! order they were submitted.

pub mod error;
pub mod queue;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use queue::{RebuildReport, RebuildTask, RebuildTicket};
pub use service::FamilyGraphService;
