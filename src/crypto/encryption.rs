//! AES-256-GCM envelope encryption
//!
//! Wraps JSON-serializable content into an [`EncryptedRecord`] and back.
//! Each encryption draws a fresh nonce from the envelope's [`RandomSource`];
//! a nonce is never taken from the caller or from a previous record.

use aes_gcm::aead::consts::{U12, U32};
use aes_gcm::aead::{Aead, KeyInit, Nonce};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::{KeyringError, KeyringResult};

use super::random::{OsRandom, RandomSource};
use super::wire::{decode_field, encode_field, WireFormat};
use super::VaultKey;

/// AES-256-GCM with the standard 96-bit nonce
type Aes256Gcm = AesGcm<Aes256, U12>;

/// AES-256-GCM with a 256-bit nonce, as written by earlier clients
type ExtendedAes256Gcm = AesGcm<Aes256, U32>;

/// Size of the standard AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the extended nonce accepted for older records
pub const EXTENDED_NONCE_SIZE: usize = 32;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Nonce length used for new records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NonceLength {
    /// 12 bytes, the length AES-GCM is specified for
    #[default]
    Standard,
    /// 32 bytes, for interoperability with clients that expect it
    Extended,
}

impl NonceLength {
    /// Number of nonce bytes
    pub fn size(self) -> usize {
        match self {
            Self::Standard => NONCE_SIZE,
            Self::Extended => EXTENDED_NONCE_SIZE,
        }
    }
}

/// An encrypted record in memory
///
/// Holds exactly two fields. `contents` is the ciphertext with the 16-byte
/// authentication tag appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    pub nonce: Vec<u8>,
    pub contents: Vec<u8>,
}

/// The persisted form of an [`EncryptedRecord`]
///
/// Both fields are independently encoded strings. Unknown fields in stored
/// JSON are dropped when read, and serialization can only emit these two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub nonce: String,
    pub contents: String,
}

impl EncryptedRecord {
    /// Encode both fields for storage
    pub fn to_stored(&self, format: WireFormat) -> KeyringResult<StoredRecord> {
        Ok(StoredRecord {
            nonce: encode_field(&self.nonce, format)?,
            contents: encode_field(&self.contents, format)?,
        })
    }

    /// Decode a stored record
    pub fn from_stored(stored: &StoredRecord) -> KeyringResult<Self> {
        Ok(Self {
            nonce: decode_field(&stored.nonce, "nonce")?,
            contents: decode_field(&stored.contents, "contents")?,
        })
    }
}

/// Outcome of opening a possibly absent record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unsealed<T> {
    /// No record exists yet (first use)
    Absent,
    /// The record authenticated and decoded
    Present(T),
}

impl<T: Default> Unsealed<T> {
    /// Return the content, or an empty default when no record existed
    pub fn into_content(self) -> T {
        match self {
            Self::Absent => T::default(),
            Self::Present(content) => content,
        }
    }
}

impl<T> Unsealed<T> {
    /// Check whether no record existed
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Authenticated encryption of vault content under a [`VaultKey`]
#[derive(Debug, Clone, Default)]
pub struct Envelope<R = OsRandom> {
    random: R,
    nonce_length: NonceLength,
}

impl Envelope<OsRandom> {
    /// Create an envelope backed by the OS random generator
    pub fn new() -> Self {
        Self::with_random(OsRandom)
    }
}

impl<R: RandomSource> Envelope<R> {
    /// Create an envelope with a specific random source
    pub fn with_random(random: R) -> Self {
        Self {
            random,
            nonce_length: NonceLength::default(),
        }
    }

    /// Set the nonce length used for new records
    pub fn with_nonce_length(mut self, nonce_length: NonceLength) -> Self {
        self.nonce_length = nonce_length;
        self
    }

    /// Nonce length used for new records
    pub fn nonce_length(&self) -> NonceLength {
        self.nonce_length
    }

    /// Serialize `content` to JSON and encrypt it
    pub fn encrypt<T>(&self, content: &T, key: &VaultKey) -> KeyringResult<EncryptedRecord>
    where
        T: Serialize + ?Sized,
    {
        let plaintext = serde_json::to_vec(content).map_err(|e| {
            KeyringError::Serialization(format!("Failed to serialize content: {}", e))
        })?;
        self.seal_bytes(&plaintext, key)
    }

    /// Encrypt raw bytes under a fresh nonce
    pub fn seal_bytes(&self, plaintext: &[u8], key: &VaultKey) -> KeyringResult<EncryptedRecord> {
        let nonce = self.random.next_bytes(self.nonce_length.size())?;
        if nonce.len() != self.nonce_length.size() {
            return Err(KeyringError::RandomSource(format!(
                "Random source returned {} nonce bytes, expected {}",
                nonce.len(),
                self.nonce_length.size()
            )));
        }

        let contents = match self.nonce_length {
            NonceLength::Standard => seal_with::<Aes256Gcm>(key, &nonce, plaintext)?,
            NonceLength::Extended => seal_with::<ExtendedAes256Gcm>(key, &nonce, plaintext)?,
        };

        debug!(
            nonce_len = nonce.len(),
            contents_len = contents.len(),
            "sealed record"
        );

        Ok(EncryptedRecord { nonce, contents })
    }

    /// Verify and decrypt a record to raw bytes
    pub fn open_bytes(&self, record: &EncryptedRecord, key: &VaultKey) -> KeyringResult<Vec<u8>> {
        let plaintext = match record.nonce.len() {
            NONCE_SIZE => open_with::<Aes256Gcm>(key, &record.nonce, &record.contents)?,
            EXTENDED_NONCE_SIZE => {
                open_with::<ExtendedAes256Gcm>(key, &record.nonce, &record.contents)?
            }
            other => {
                return Err(KeyringError::Serialization(format!(
                    "Invalid nonce size: expected {} or {}, got {}",
                    NONCE_SIZE, EXTENDED_NONCE_SIZE, other
                )))
            }
        };

        debug!(plaintext_len = plaintext.len(), "opened record");
        Ok(plaintext)
    }

    /// Open a record that may not exist
    ///
    /// `None` yields [`Unsealed::Absent`] without touching the cipher. A record
    /// that fails authentication is always an error, never empty content.
    pub fn open<T>(
        &self,
        record: Option<&EncryptedRecord>,
        key: &VaultKey,
    ) -> KeyringResult<Unsealed<T>>
    where
        T: DeserializeOwned + Default,
    {
        let Some(record) = record else {
            debug!("no record present, starting empty");
            return Ok(Unsealed::Absent);
        };

        let plaintext = self.open_bytes(record, key)?;
        if plaintext.is_empty() {
            return Ok(Unsealed::Present(T::default()));
        }

        let content = serde_json::from_slice(&plaintext).map_err(|e| {
            KeyringError::Serialization(format!("Decrypted content is not valid JSON: {}", e))
        })?;
        Ok(Unsealed::Present(content))
    }

    /// Decrypt a record, returning empty content when none exists
    pub fn decrypt<T>(&self, record: Option<&EncryptedRecord>, key: &VaultKey) -> KeyringResult<T>
    where
        T: DeserializeOwned + Default,
    {
        self.open(record, key).map(Unsealed::into_content)
    }
}

fn seal_with<C>(key: &VaultKey, nonce: &[u8], plaintext: &[u8]) -> KeyringResult<Vec<u8>>
where
    C: Aead + KeyInit,
{
    let cipher = C::new_from_slice(key.as_bytes())
        .map_err(|e| KeyringError::Derivation(format!("Failed to create cipher: {}", e)))?;

    cipher
        .encrypt(Nonce::<C>::from_slice(nonce), plaintext)
        .map_err(|e| KeyringError::Serialization(format!("Encryption failed: {}", e)))
}

fn open_with<C>(key: &VaultKey, nonce: &[u8], contents: &[u8]) -> KeyringResult<Vec<u8>>
where
    C: Aead + KeyInit,
{
    let cipher = C::new_from_slice(key.as_bytes())
        .map_err(|e| KeyringError::Derivation(format!("Failed to create cipher: {}", e)))?;

    cipher
        .decrypt(Nonce::<C>::from_slice(nonce), contents)
        .map_err(|_| KeyringError::Authentication)
}
