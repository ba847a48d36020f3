//! File-backed record store
//!
//! Stores one JSON file per account under the records directory:
//! `<records_dir>/<account id>.json`.

use std::path::PathBuf;

use tracing::debug;

use crate::crypto::StoredRecord;
use crate::error::{KeyringError, KeyringResult};
use crate::models::AccountId;

use super::file_io::{read_json_optional, write_json_atomic};
use super::RecordStore;

/// A [`RecordStore`] writing each account's record to its own file
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the record file for an account
    pub fn record_path(&self, account_id: &AccountId) -> KeyringResult<PathBuf> {
        if !account_id.is_path_safe() {
            return Err(KeyringError::Storage(format!(
                "Account id is not usable as a file name: {:?}",
                account_id.as_str()
            )));
        }
        Ok(self.dir.join(format!("{}.json", account_id)))
    }
}

impl RecordStore for FileStore {
    fn read(&self, account_id: &AccountId) -> KeyringResult<Option<StoredRecord>> {
        let path = self.record_path(account_id)?;
        let record = read_json_optional(&path)?;
        debug!(account = %account_id, found = record.is_some(), "read record");
        Ok(record)
    }

    fn write(&self, account_id: &AccountId, record: &StoredRecord) -> KeyringResult<()> {
        let path = self.record_path(account_id)?;
        write_json_atomic(&path, record)
    }
}
