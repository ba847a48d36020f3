//! Signed-in session state
//!
//! A session pairs the account id with the vault key derived for it. Both are
//! passed explicitly to every vault operation; nothing is read from globals.

use std::fmt;

use crate::crypto::{derive_account_key, VaultKey};
use crate::models::AccountId;

/// An authenticated account and its vault key
pub struct Session {
    account_id: AccountId,
    key: VaultKey,
}

impl Session {
    /// Derive the vault key for an account and open a session
    pub fn establish(account_id: AccountId, email: &str, password: &str) -> Self {
        let key = derive_account_key(account_id.as_str(), email, password);
        Self { account_id, key }
    }

    /// The signed-in account
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// The vault key for this session
    pub fn key(&self) -> &VaultKey {
        &self.key
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("account_id", &self.account_id)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
