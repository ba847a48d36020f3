//! Storage layer for KeyRing
//!
//! The vault only ever hands ciphertext to a [`RecordStore`]. Two stores are
//! provided: an in-memory one and a JSON file per account on disk. The
//! account directory used by the local authenticator also lives here.

pub mod accounts;
pub mod file_io;
pub mod memory;
pub mod records;

pub use accounts::AccountRepository;
pub use file_io::{read_json, read_json_optional, write_json_atomic};
pub use memory::MemoryStore;
pub use records::FileStore;

use crate::crypto::StoredRecord;
use crate::error::KeyringResult;
use crate::models::AccountId;

/// Remote store of encrypted records, keyed by account
///
/// Implementations round-trip the two string fields of a [`StoredRecord`]
/// and never see plaintext.
pub trait RecordStore: Send + Sync {
    /// Read the record for an account, or `None` if nothing was stored yet
    fn read(&self, account_id: &AccountId) -> KeyringResult<Option<StoredRecord>>;

    /// Replace the record for an account
    fn write(&self, account_id: &AccountId, record: &StoredRecord) -> KeyringResult<()>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn read(&self, account_id: &AccountId) -> KeyringResult<Option<StoredRecord>> {
        (**self).read(account_id)
    }

    fn write(&self, account_id: &AccountId, record: &StoredRecord) -> KeyringResult<()> {
        (**self).write(account_id, record)
    }
}
