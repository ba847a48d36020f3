//! Cryptographic core for KeyRing
//!
//! Provides SHA-256 key derivation from account credentials, AES-256-GCM
//! envelope encryption of vault content, and the random source used for
//! nonces.

pub mod encryption;
pub mod key_derivation;
pub mod random;
pub mod secure_memory;
pub mod wire;

pub use encryption::{EncryptedRecord, Envelope, NonceLength, StoredRecord, Unsealed};
pub use key_derivation::{credential_material, derive_account_key, derive_key, VaultKey};
pub use random::{OsRandom, RandomSource, DEFAULT_RANDOM_LENGTH};
pub use secure_memory::SecureString;
pub use wire::WireFormat;
