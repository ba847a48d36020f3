//! Account repository for JSON storage
//!
//! Manages loading and saving registered accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::KeyringError;
use crate::models::Account;

use super::file_io::{read_json, write_json_atomic};

/// Serializable account data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence, indexed by normalized email
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<String, Account>>,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), KeyringError> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            KeyringError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for account in file_data.accounts {
            data.insert(Account::normalize_email(&account.email), account);
        }

        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), KeyringError> {
        let data = self.data.read().map_err(|e| {
            KeyringError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &AccountData { accounts })
    }

    /// Find an account by email (case-insensitive)
    pub fn get_by_email(&self, email: &str) -> Result<Option<Account>, KeyringError> {
        let data = self.data.read().map_err(|e| {
            KeyringError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&Account::normalize_email(email)).cloned())
    }

    /// Insert an account, returning false if the email is already registered
    pub fn insert(&self, account: Account) -> Result<bool, KeyringError> {
        let mut data = self.data.write().map_err(|e| {
            KeyringError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let key = Account::normalize_email(&account.email);
        if data.contains_key(&key) {
            return Ok(false);
        }
        data.insert(key, account);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, AccountRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.json");
        let repo = AccountRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.get_by_email("a@b.com").unwrap(), None);
    }

    #[test]
    fn test_insert_and_lookup_case_insensitive() {
        let (_temp_dir, repo) = create_test_repo();
        let account = Account::new("User@Example.com", "hash");

        assert!(repo.insert(account.clone()).unwrap());
        assert!(!repo.insert(Account::new("user@example.com", "other")).unwrap());

        let found = repo.get_by_email("user@EXAMPLE.com").unwrap().unwrap();
        assert_eq!(found.id, account.id);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let account = Account::new("a@b.com", "hash");
        repo.insert(account.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = AccountRepository::new(temp_dir.path().join("accounts.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get_by_email("a@b.com").unwrap(), Some(account));
    }
}
