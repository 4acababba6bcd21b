//! Service error types

use kinship_store::StoreError;
use thiserror::Error;

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Graph error: {0}")]
    Core(#[from] kinship_core::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Rebuild queue is closed")]
    QueueClosed,

    #[error("Rebuild worker stopped before reporting")]
    WorkerGone,
}
