//! Person source trait definitions

use crate::error::StoreResult;
use async_trait::async_trait;
use kinship_core::PersonRecord;

/// Where the graph builder reads person records from
#[async_trait]
pub trait PersonSource: Send + Sync {
    /// Every current record, in a stable order
    async fn load_all(&self) -> StoreResult<Vec<PersonRecord>>;
}
