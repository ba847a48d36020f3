use keyring::crypto::{
    derive_account_key, derive_key, EncryptedRecord, Envelope, NonceLength, WireFormat,
};
use keyring::models::Vault;
use proptest::prelude::*;

proptest! {
    #[test]
    fn seal_open_always_roundtrips(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let envelope = Envelope::new();
        let key = derive_key("uid123a@b.compassword1");

        let record = envelope.seal_bytes(&data, &key).unwrap();
        prop_assert_eq!(record.contents.len(), data.len() + 16);
        let opened = envelope.open_bytes(&record, &key).unwrap();
        prop_assert_eq!(opened, data);
    }

    #[test]
    fn vault_survives_storage_encoding(
        entries in proptest::collection::vec(("[a-z]{1,8}", "[a-z]{1,8}", ".{0,24}"), 0..8),
        base64 in any::<bool>(),
    ) {
        let mut vault = Vault::new();
        for (group, key, value) in &entries {
            vault.set_entry(group, key, value).unwrap();
        }

        let key = derive_account_key("uid123", "a@b.com", "password1");
        let envelope = Envelope::new();
        let format = if base64 { WireFormat::Base64 } else { WireFormat::ByteArray };

        let stored = envelope.encrypt(&vault, &key).unwrap().to_stored(format).unwrap();
        let record = EncryptedRecord::from_stored(&stored).unwrap();
        let decrypted: Vault = envelope.decrypt(Some(&record), &key).unwrap();
        prop_assert_eq!(decrypted, vault);
    }

    #[test]
    fn any_flipped_bit_fails_authentication(
        data in proptest::collection::vec(any::<u8>(), 1..256),
        extended in any::<bool>(),
        in_nonce in any::<bool>(),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let nonce_length = if extended { NonceLength::Extended } else { NonceLength::Standard };
        let envelope = Envelope::new().with_nonce_length(nonce_length);
        let key = derive_key("uid123a@b.compassword1");

        let mut record = envelope.seal_bytes(&data, &key).unwrap();
        let field = if in_nonce { &mut record.nonce } else { &mut record.contents };
        let i = index.index(field.len());
        field[i] ^= 1 << bit;

        let err = envelope.open_bytes(&record, &key).unwrap_err();
        prop_assert!(err.is_authentication_failure());
    }

    #[test]
    fn other_credentials_fail_authentication(password in "[a-z0-9]{1,16}") {
        prop_assume!(password != "password1");
        let envelope = Envelope::new();
        let key = derive_account_key("uid123", "a@b.com", "password1");
        let other = derive_account_key("uid123", "a@b.com", &password);

        let record = envelope.encrypt(&"secret1", &key).unwrap();
        let err = envelope.decrypt::<String>(Some(&record), &other).unwrap_err();
        prop_assert!(err.is_authentication_failure());
    }
}
