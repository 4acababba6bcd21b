//! JSON file person store

use std::path::{Path, PathBuf};

use crate::error::StoreResult;
use crate::traits::PersonSource;
use async_trait::async_trait;
use kinship_core::limits::validate_person_name;
use kinship_core::PersonRecord;

/// Reads a JSON array of person records from disk
///
/// The file is re-read on every load, so a rebuild always sees the current
/// contents.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> StoreResult<Vec<PersonRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let records: Vec<PersonRecord> = serde_json::from_str(&content)?;
        for record in &records {
            validate_person_name(&record.name)?;
        }
        tracing::debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

#[async_trait]
impl PersonSource for JsonFileStore {
    async fn load_all(&self) -> StoreResult<Vec<PersonRecord>> {
        self.read().await
    }
}
