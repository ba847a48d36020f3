//! Registered account model
//!
//! Accounts are held by the local authentication backend. Only a password
//! hash is stored; the password itself never reaches disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::AccountId;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Backend-assigned identifier
    pub id: AccountId,

    /// Email as entered at registration
    pub email: String,

    /// Argon2id hash of the password in PHC string format
    pub password_hash: String,

    /// When the account was registered
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a fresh id
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: AccountId::generate(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Normalize an email for lookups (trimmed, lowercase)
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("a@b.com", "$argon2id$...");
        assert_eq!(account.email, "a@b.com");
        assert!(account.id.is_path_safe());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(Account::normalize_email("  A@B.com "), "a@b.com");
    }
}
