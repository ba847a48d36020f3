//! Local account directory
//!
//! Accounts are stored in `accounts.json` with Argon2id password hashes.
//! This stands in for a hosted authentication service: it assigns account
//! ids and verifies passwords, and nothing else.

use std::path::PathBuf;
use std::sync::RwLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, info};

use crate::error::{AuthError, KeyringError, KeyringResult};
use crate::models::{Account, AccountId};
use crate::storage::AccountRepository;

use super::{Authenticator, Identity};

/// File-backed [`Authenticator`]
pub struct LocalAuthenticator {
    accounts: AccountRepository,
    current: RwLock<Option<AccountId>>,
}

impl LocalAuthenticator {
    /// Open the account directory at `path`, loading existing accounts
    pub fn open(path: PathBuf) -> KeyringResult<Self> {
        let accounts = AccountRepository::new(path);
        accounts.load()?;
        Ok(Self {
            accounts,
            current: RwLock::new(None),
        })
    }

    /// The currently signed-in account, if any
    pub fn current_account(&self) -> KeyringResult<Option<AccountId>> {
        let current = self.current.read().map_err(|e| {
            KeyringError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(current.clone())
    }

    fn set_current(&self, account_id: Option<AccountId>) -> KeyringResult<()> {
        let mut current = self.current.write().map_err(|e| {
            KeyringError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *current = account_id;
        Ok(())
    }
}

impl Authenticator for LocalAuthenticator {
    fn sign_in(&self, email: &str, password: &str) -> KeyringResult<Identity> {
        let account = self
            .accounts
            .get_by_email(email)?
            .ok_or_else(|| AuthError::UserNotFound(email.trim().to_string()))?;

        let parsed = PasswordHash::new(&account.password_hash)
            .map_err(|e| AuthError::Backend(format!("Corrupt password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::WrongPassword)?;

        debug!(account = %account.id, "signed in");
        self.set_current(Some(account.id.clone()))?;
        Ok(Identity {
            account_id: account.id,
            email: account.email,
        })
    }

    fn register(&self, email: &str, password: &str) -> KeyringResult<Identity> {
        let email = email.trim();
        if !is_plausible_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()).into());
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Backend(format!("Password hashing failed: {}", e)))?
            .to_string();

        let account = Account::new(email, hash);
        let id = account.id.clone();

        if !self.accounts.insert(account)? {
            return Err(AuthError::EmailTaken(email.to_string()).into());
        }
        self.accounts.save()?;

        info!(account = %id, "registered account");
        self.set_current(Some(id.clone()))?;
        Ok(Identity {
            account_id: id,
            email: email.to_string(),
        })
    }

    fn sign_out(&self) -> KeyringResult<()> {
        self.set_current(None)
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
