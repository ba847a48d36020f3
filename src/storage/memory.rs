//! In-memory record store

use std::collections::HashMap;
use std::sync::RwLock;

use crate::crypto::StoredRecord;
use crate::error::{KeyringError, KeyringResult};
use crate::models::AccountId;

use super::RecordStore;

/// A [`RecordStore`] backed by a map, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<AccountId, StoredRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> KeyringResult<usize> {
        let records = self.records.read().map_err(|e| {
            KeyringError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(records.len())
    }

    /// Check if no records are stored
    pub fn is_empty(&self) -> KeyringResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, account_id: &AccountId) -> KeyringResult<Option<StoredRecord>> {
        let records = self.records.read().map_err(|e| {
            KeyringError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(records.get(account_id).cloned())
    }

    fn write(&self, account_id: &AccountId, record: &StoredRecord) -> KeyringResult<()> {
        let mut records = self.records.write().map_err(|e| {
            KeyringError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        records.insert(account_id.clone(), record.clone());
        Ok(())
    }
}
