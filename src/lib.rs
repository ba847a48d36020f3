//! KeyRing - client-side encrypted key/value vault
//!
//! A vault maps group names to string key/value pairs. It is serialized to
//! JSON, sealed with AES-256-GCM under a key derived from the account's
//! credentials and handed to a record store as an opaque
//! `{ nonce, contents }` pair. The store never sees plaintext or the key.
//!
//! # Architecture
//!
//! - `crypto`: key derivation, the AEAD envelope, random sources and the
//!   record wire encoding
//! - `models`: the vault and account data models
//! - `auth`: the authentication collaborator that issues account ids
//! - `storage`: record stores and JSON file helpers
//! - `services`: the keyring service tying sessions, envelope and store
//! - `config`: path resolution and user settings
//! - `cli` / `display`: command handlers and terminal output
//!
//! # Example
//!
//! ```rust,ignore
//! use keyring::{services::Keyring, session::Session, storage::MemoryStore};
//!
//! let keyring = Keyring::new(MemoryStore::new());
//! let session = Session::establish(account_id, "a@b.com", "password1");
//! let mut vault = keyring.load(&session)?;
//! vault.set_entry("email", "gmail", "secret1")?;
//! keyring.sync(&session, &vault)?;
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{AuthError, KeyringError, KeyringResult};
