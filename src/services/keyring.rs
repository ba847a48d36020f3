//! Vault load/sync service
//!
//! Joins a [`RecordStore`] and an [`Envelope`]. Loading reads the account's
//! record and decrypts it; syncing encrypts the current vault under a fresh
//! nonce and replaces the stored record.

use tracing::{debug, info};

use crate::config::Settings;
use crate::crypto::{EncryptedRecord, Envelope, OsRandom, RandomSource, Unsealed, WireFormat};
use crate::error::KeyringResult;
use crate::models::Vault;
use crate::session::Session;
use crate::storage::RecordStore;

/// Loads and syncs an account's encrypted vault
pub struct Keyring<S, R = OsRandom> {
    store: S,
    envelope: Envelope<R>,
    wire_format: WireFormat,
}

impl<S: RecordStore> Keyring<S, OsRandom> {
    /// Create a keyring with the OS random source and default formats
    pub fn new(store: S) -> Self {
        Self::with_envelope(store, Envelope::new())
    }

    /// Create a keyring configured from settings
    pub fn from_settings(store: S, settings: &Settings) -> Self {
        Self::with_envelope(
            store,
            Envelope::new().with_nonce_length(settings.nonce_length),
        )
        .with_wire_format(settings.wire_format)
    }
}

impl<S: RecordStore, R: RandomSource> Keyring<S, R> {
    /// Create a keyring with a specific envelope
    pub fn with_envelope(store: S, envelope: Envelope<R>) -> Self {
        Self {
            store,
            envelope,
            wire_format: WireFormat::default(),
        }
    }

    /// Set the encoding used when writing records
    pub fn with_wire_format(mut self, wire_format: WireFormat) -> Self {
        self.wire_format = wire_format;
        self
    }

    /// Read and open the account's record
    ///
    /// Distinguishes "nothing stored yet" from stored content. A record that
    /// fails authentication is an error.
    pub fn open(&self, session: &Session) -> KeyringResult<Unsealed<Vault>> {
        let record = match self.store.read(session.account_id())? {
            Some(stored) => Some(EncryptedRecord::from_stored(&stored)?),
            None => None,
        };

        let opened = self.envelope.open(record.as_ref(), session.key())?;
        if opened.is_absent() {
            info!(account = %session.account_id(), "no stored vault, starting empty");
        }
        Ok(opened)
    }

    /// Load the account's vault, empty when nothing was stored yet
    pub fn load(&self, session: &Session) -> KeyringResult<Vault> {
        self.open(session).map(Unsealed::into_content)
    }

    /// Encrypt the vault under a fresh nonce and store it
    pub fn sync(&self, session: &Session, vault: &Vault) -> KeyringResult<()> {
        let record = self.envelope.encrypt(vault, session.key())?;
        let stored = record.to_stored(self.wire_format)?;
        self.store.write(session.account_id(), &stored)?;

        debug!(
            account = %session.account_id(),
            groups = vault.group_count(),
            entries = vault.entry_count(),
            "synced vault"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{NonceLength, StoredRecord};
    use crate::error::KeyringError;
    use crate::storage::MemoryStore;

    fn session(password: &str) -> Session {
        Session::establish("uid123".into(), "a@b.com", password)
    }

    fn sample_vault() -> Vault {
        let mut vault = Vault::new();
        vault.set_entry("email", "gmail", "secret1").unwrap();
        vault
    }

    #[test]
    fn test_first_load_is_empty() {
        let keyring = Keyring::new(MemoryStore::new());
        let opened = keyring.open(&session("password1")).unwrap();
        assert!(opened.is_absent());
        assert!(keyring.load(&session("password1")).unwrap().is_empty());
    }

    #[test]
    fn test_sync_then_load() {
        let keyring = Keyring::new(MemoryStore::new());
        let session = session("password1");

        keyring.sync(&session, &sample_vault()).unwrap();
        assert_eq!(keyring.load(&session).unwrap(), sample_vault());
    }

    #[test]
    fn test_wrong_password_is_not_empty_data() {
        let keyring = Keyring::new(MemoryStore::new());
        keyring.sync(&session("password1"), &sample_vault()).unwrap();

        let err = keyring.load(&session("wrongpass")).unwrap_err();
        assert!(err.is_authentication_failure());
    }

    #[test]
    fn test_store_never_sees_plaintext() {
        let store = MemoryStore::new();
        let keyring = Keyring::new(&store).with_wire_format(WireFormat::Base64);
        let session = session("password1");
        keyring.sync(&session, &sample_vault()).unwrap();

        let stored = store.read(session.account_id()).unwrap().unwrap();
        let raw = serde_json::to_string(&stored).unwrap();
        assert!(!raw.contains("secret1"));
        assert!(!raw.contains("gmail"));
    }

    #[test]
    fn test_each_sync_uses_new_nonce() {
        let store = MemoryStore::new();
        let keyring = Keyring::new(&store);
        let session = session("password1");

        keyring.sync(&session, &sample_vault()).unwrap();
        let first = store.read(session.account_id()).unwrap().unwrap();
        keyring.sync(&session, &sample_vault()).unwrap();
        let second = store.read(session.account_id()).unwrap().unwrap();

        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.contents, second.contents);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            wire_format: WireFormat::Base64,
            nonce_length: NonceLength::Extended,
            ..Settings::default()
        };
        let store = MemoryStore::new();
        let keyring = Keyring::from_settings(&store, &settings);
        let session = session("password1");
        keyring.sync(&session, &sample_vault()).unwrap();

        let stored = store.read(session.account_id()).unwrap().unwrap();
        assert!(!stored.nonce.starts_with('['));
        let record = EncryptedRecord::from_stored(&stored).unwrap();
        assert_eq!(record.nonce.len(), NonceLength::Extended.size());
        assert_eq!(keyring.load(&session).unwrap(), sample_vault());
    }

    #[test]
    fn test_malformed_stored_record() {
        let store = MemoryStore::new();
        let session = session("password1");
        store
            .write(
                session.account_id(),
                &StoredRecord {
                    nonce: "[1,2,3]".into(),
                    contents: "%%%".into(),
                },
            )
            .unwrap();

        let err = Keyring::new(&store).load(&session).unwrap_err();
        assert!(matches!(err, KeyringError::Serialization(_)));
    }

    #[test]
    fn test_vault_opens_when_sign_in_email_case_differs() {
        use crate::auth::{Authenticator, LocalAuthenticator};

        let temp_dir = tempfile::TempDir::new().unwrap();
        let auth = LocalAuthenticator::open(temp_dir.path().join("accounts.json")).unwrap();
        let keyring = Keyring::new(MemoryStore::new());

        let registered = auth.register("A@B.com", "password1").unwrap();
        let session = Session::establish(registered.account_id, &registered.email, "password1");
        keyring.sync(&session, &sample_vault()).unwrap();

        let signed_in = auth.sign_in("a@b.com", "password1").unwrap();
        let session = Session::establish(signed_in.account_id, &signed_in.email, "password1");
        assert_eq!(keyring.load(&session).unwrap(), sample_vault());
    }
}
