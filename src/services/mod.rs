//! Service layer for KeyRing
//!
//! Services combine the crypto core with the storage collaborators.

pub mod keyring;

pub use keyring::Keyring;
