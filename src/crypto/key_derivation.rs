//! Key derivation using SHA-256
//!
//! The vault key is never stored. It is re-derived on every sign-in from the
//! account id assigned by the authentication backend, the email and the
//! password, so it is bound to one account record as well as the password.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the vault key in bytes (AES-256)
pub const KEY_LENGTH: usize = 32;

/// A derived 32-byte vault key, zeroed when dropped
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct VaultKey {
    key: [u8; KEY_LENGTH],
}

impl VaultKey {
    /// Wrap raw key bytes
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultKey([REDACTED])")
    }
}

/// Derive a vault key from credential material
///
/// The key is the raw SHA-256 digest of the UTF-8 bytes of `material`.
/// Every string, including the empty one, is valid input.
pub fn derive_key(material: &str) -> VaultKey {
    let mut digest: [u8; KEY_LENGTH] = Sha256::digest(material.as_bytes()).into();
    let key = VaultKey::from_bytes(digest);
    digest.zeroize();
    key
}

/// Build the credential string that a vault key is derived from
///
/// The parts are concatenated in `account id, email, password` order with no
/// separator. Records written by earlier clients depend on this exact layout.
pub fn credential_material(account_id: &str, email: &str, password: &str) -> String {
    let mut material = String::with_capacity(account_id.len() + email.len() + password.len());
    material.push_str(account_id);
    material.push_str(email);
    material.push_str(password);
    material
}

/// Derive the vault key for an account from its credentials
pub fn derive_account_key(account_id: &str, email: &str, password: &str) -> VaultKey {
    let mut material = credential_material(account_id, email, password);
    let key = derive_key(&material);
    material.zeroize();
    key
}
