//! Custom error types for KeyRing
//!
//! This module defines the error hierarchy for the vault using thiserror.
//! Cryptographic failures are kept apart from storage and authentication
//! failures so callers can tell a wrong password from missing data.

use thiserror::Error;

/// Failures reported by an [`Authenticator`](crate::auth::Authenticator)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No account is registered under this email
    #[error("No account found for {0}")]
    UserNotFound(String),

    /// The account exists but the password did not verify
    #[error("Incorrect password")]
    WrongPassword,

    /// Registration was attempted for an email that is already in use
    #[error("An account already exists for {0}")]
    EmailTaken(String),

    /// The email address is not usable as an account identifier
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Any other backend failure
    #[error("Authentication backend error: {0}")]
    Backend(String),
}

/// The main error type for KeyRing operations
#[derive(Error, Debug)]
pub enum KeyringError {
    /// Key derivation failed. A digest over arbitrary bytes cannot fail, so
    /// this only surfaces if a derived key is rejected by the cipher.
    #[error("Key derivation error: {0}")]
    Derivation(String),

    /// Content could not be encoded as JSON, decrypted bytes were not valid
    /// JSON, or a stored record field was malformed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// AEAD tag verification failed: wrong key or tampered data
    #[error("Decryption failed: wrong key or corrupted data")]
    Authentication,

    /// The random generator could not produce bytes
    #[error("Random source failure: {0}")]
    RandomSource(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Record store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Authentication collaborator errors
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Validation errors for vault edits
    #[error("Validation error: {0}")]
    Validation(String),

    /// Vault group or entry not found
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl KeyringError {
    /// Create a "not found" error for vault groups
    pub fn group_not_found(group: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Group",
            identifier: group.into(),
        }
    }

    /// Create a "not found" error for entries within a group
    pub fn entry_not_found(group: &str, key: &str) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: format!("{}/{}", group, key),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an AEAD authentication failure
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Check if sign-in failed because the account does not exist
    pub fn is_user_not_found(&self) -> bool {
        matches!(self, Self::Auth(AuthError::UserNotFound(_)))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for KeyringError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KeyringError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for KeyRing operations
pub type KeyringResult<T> = Result<T, KeyringError>;
