//! In-memory person store for tests and embedding

use crate::error::{StoreError, StoreResult};
use crate::traits::PersonSource;
use async_trait::async_trait;
use kinship_core::limits::validate_person_name;
use kinship_core::{PersonId, PersonRecord};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory person store
///
/// Records are kept in a map; `load_all` returns them ordered by id.
pub struct MemoryPersonStore {
    records: RwLock<HashMap<PersonId, PersonRecord>>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store holding `records`
    pub fn with_records(records: impl IntoIterator<Item = PersonRecord>) -> StoreResult<Self> {
        let store = Self::new();
        for record in records {
            store.upsert(record)?;
        }
        Ok(store)
    }

    /// Insert a record, replacing any record with the same id
    pub fn upsert(&self, record: PersonRecord) -> StoreResult<()> {
        validate_person_name(&record.name)?;
        let mut records = self
            .records
            .write()
            .map_err(|e| StoreError::Database(format!("Lock error: {}", e)))?;
        records.insert(record.id, record);
        Ok(())
    }

    /// Remove a record, returning it
    pub fn remove(&self, id: &PersonId) -> StoreResult<PersonRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|e| StoreError::Database(format!("Lock error: {}", e)))?;
        records
            .remove(id)
            .ok_or_else(|| StoreError::PersonNotFound(id.to_string()))
    }

    pub fn len(&self) -> StoreResult<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::Database(format!("Lock error: {}", e)))?;
        Ok(records.len())
    }
}

impl Default for MemoryPersonStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonSource for MemoryPersonStore {
    async fn load_all(&self) -> StoreResult<Vec<PersonRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::Database(format!("Lock error: {}", e)))?;
        let mut all: Vec<PersonRecord> = records.values().cloned().collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }
}
