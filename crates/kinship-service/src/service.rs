//! The family graph service

use std::sync::Arc;

use kinship_core::{
    GraphBuilder, GraphIndex, GraphNode, IndexStats, PersonId, Relationship,
    RelationLinkExtractor, TraversalEngine,
};
use kinship_store::PersonSource;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{ServiceError, ServiceResult};
use crate::queue::{RebuildJob, RebuildTask, RebuildTicket, RebuildWorker};

/// Owns the graph index and the single rebuild worker that writes to it
pub struct FamilyGraphService {
    index: Arc<GraphIndex>,
    jobs: mpsc::UnboundedSender<RebuildJob>,
    worker: JoinHandle<()>,
}

impl FamilyGraphService {
    /// Build the graph from `source` and start the rebuild worker.
    ///
    /// The initial full rebuild completes before this returns, so the first
    /// query already sees the whole graph.
    pub async fn start<S, E>(source: Arc<S>, extractor: E) -> ServiceResult<Self>
    where
        S: PersonSource + ?Sized + 'static,
        E: RelationLinkExtractor + 'static,
    {
        let index = Arc::new(GraphIndex::new());
        let worker = RebuildWorker::new(
            source,
            GraphBuilder::with_extractor(extractor),
            Arc::clone(&index),
        );

        let report = worker.process(RebuildTask::Full).await?;
        tracing::info!("Family graph ready with {} persons", report.index_size);

        let (jobs, queue) = mpsc::unbounded_channel();
        let worker = tokio::spawn(worker.run(queue));

        Ok(Self {
            index,
            jobs,
            worker,
        })
    }

    fn submit(&self, task: RebuildTask) -> ServiceResult<RebuildTicket> {
        let (job, ticket) = RebuildJob::new(task);
        self.jobs.send(job).map_err(|_| ServiceError::QueueClosed)?;
        tracing::debug!(task = %task, "Rebuild queued");
        Ok(ticket)
    }

    /// Queue a rebuild of the whole graph
    pub fn rebuild_full(&self) -> ServiceResult<RebuildTicket> {
        self.submit(RebuildTask::Full)
    }

    /// Queue a rebuild of `id` and its direct relations, after its record
    /// was created, edited or deleted.
    pub fn rebuild_scoped(&self, id: PersonId) -> ServiceResult<RebuildTicket> {
        self.submit(RebuildTask::Scoped(id))
    }

    /// Stop accepting rebuilds and wait for queued ones to finish
    pub async fn shutdown(self) -> ServiceResult<()> {
        drop(self.jobs);
        self.worker.await.map_err(|_| ServiceError::WorkerGone)
    }

    /// The shared index, for readers on other tasks or threads
    pub fn index(&self) -> Arc<GraphIndex> {
        Arc::clone(&self.index)
    }

    pub fn person(&self, id: &PersonId) -> Option<Arc<GraphNode>> {
        self.index.get(id)
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn ancestors(&self, id: &PersonId, max_distance: u32) -> Vec<Relationship> {
        TraversalEngine::ancestors(&self.index, id, max_distance)
    }

    pub fn descendants(&self, id: &PersonId, max_distance: u32) -> Vec<Relationship> {
        TraversalEngine::descendants(&self.index, id, max_distance)
    }

    pub fn siblings(&self, id: &PersonId) -> Vec<Relationship> {
        TraversalEngine::siblings(&self.index, id)
    }

    pub fn close_relatives_including_marriage(
        &self,
        id: &PersonId,
        max_distance: u32,
    ) -> Vec<Relationship> {
        TraversalEngine::close_relatives_including_marriage(&self.index, id, max_distance)
    }

    pub fn close_relatives_excluding_marriage(
        &self,
        id: &PersonId,
        max_distance: u32,
    ) -> Vec<Relationship> {
        TraversalEngine::close_relatives_excluding_marriage(&self.index, id, max_distance)
    }

    pub fn other_relatives(&self, id: &PersonId, max_distance: u32) -> Vec<Relationship> {
        TraversalEngine::other_relatives(&self.index, id, max_distance)
    }
}
