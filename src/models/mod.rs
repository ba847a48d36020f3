//! Data models for KeyRing
//!
//! - `AccountId`: identifier issued by the authentication backend
//! - `Account`: a registered account in the local directory
//! - `Vault`: the decrypted group/key/value content of an account

pub mod account;
pub mod ids;
pub mod vault;

pub use account::Account;
pub use ids::AccountId;
pub use vault::{Group, Vault, VaultValidationError, MAX_GROUP_NAME_LEN};
