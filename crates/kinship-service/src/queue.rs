//! Rebuild tasks and the worker that runs them

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kinship_core::{GraphBuilder, GraphIndex, PersonId, PersonRecords, RelationLinkExtractor};
use kinship_store::PersonSource;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use crate::error::{ServiceError, ServiceResult};

/// A unit of rebuild work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "person", rename_all = "lowercase")]
pub enum RebuildTask {
    /// Rebuild every node from every record
    Full,
    /// Rebuild one person and the persons its record links to
    Scoped(PersonId),
}

impl std::fmt::Display for RebuildTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Scoped(id) => write!(f, "scoped({})", id),
        }
    }
}

/// Outcome of a completed rebuild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildReport {
    pub task: RebuildTask,
    pub nodes_rebuilt: usize,
    /// Nodes in the index once the rebuild was published
    pub index_size: usize,
    pub finished_at: DateTime<Utc>,
}

/// Handle to a submitted rebuild
///
/// Dropping the ticket does not cancel the rebuild.
#[derive(Debug)]
pub struct RebuildTicket {
    reply: oneshot::Receiver<ServiceResult<RebuildReport>>,
}

impl RebuildTicket {
    /// Wait for the rebuild to finish
    pub async fn wait(self) -> ServiceResult<RebuildReport> {
        self.reply.await.map_err(|_| ServiceError::WorkerGone)?
    }
}

pub(crate) struct RebuildJob {
    task: RebuildTask,
    reply: oneshot::Sender<ServiceResult<RebuildReport>>,
}

impl RebuildJob {
    pub(crate) fn new(task: RebuildTask) -> (Self, RebuildTicket) {
        let (reply, receiver) = oneshot::channel();
        (
            Self { task, reply },
            RebuildTicket { reply: receiver },
        )
    }
}

pub(crate) struct RebuildWorker<S: ?Sized, E> {
    source: Arc<S>,
    builder: GraphBuilder<E>,
    index: Arc<GraphIndex>,
}

impl<S, E> RebuildWorker<S, E>
where
    S: PersonSource + ?Sized,
    E: RelationLinkExtractor,
{
    pub(crate) fn new(source: Arc<S>, builder: GraphBuilder<E>, index: Arc<GraphIndex>) -> Self {
        Self {
            source,
            builder,
            index,
        }
    }

    /// Take jobs off the queue one at a time until every sender is gone
    pub(crate) async fn run(self, mut jobs: mpsc::UnboundedReceiver<RebuildJob>) {
        while let Some(job) = jobs.recv().await {
            let result = self.process(job.task).await;
            match &result {
                Ok(report) => tracing::info!(
                    task = %job.task,
                    nodes = report.nodes_rebuilt,
                    "Rebuild finished"
                ),
                Err(e) => tracing::error!(task = %job.task, "Rebuild failed: {}", e),
            }
            // the submitter may have dropped its ticket
            let _ = job.reply.send(result);
        }
        tracing::debug!("Rebuild queue closed, worker exiting");
    }

    pub(crate) async fn process(&self, task: RebuildTask) -> ServiceResult<RebuildReport> {
        let records: PersonRecords = self.source.load_all().await?.into();

        let nodes_rebuilt = match task {
            RebuildTask::Full => self.builder.build_full(&records, &self.index)?,
            RebuildTask::Scoped(id) => match records.get(&id) {
                Some(record) => self.builder.rebuild_scoped(record, &records, &self.index)?,
                None => {
                    tracing::warn!(person_id = %id, "Record no longer exists, dropping its node");
                    self.builder.rebuild_removed(id, &records, &self.index)?
                }
            },
        };

        Ok(RebuildReport {
            task,
            nodes_rebuilt,
            index_size: self.index.len(),
            finished_at: Utc::now(),
        })
    }
}
