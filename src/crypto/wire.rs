//! Transport encoding of record fields
//!
//! Each byte field of a stored record is written as an independent string.
//! Two encodings are produced: a JSON array of byte values (the default) and
//! standard base64. On read, the encoding is detected from the field itself,
//! which also accepts the index-keyed object form (`{"0":12,"1":7}`) that
//! browser clients emit when they stringify a typed array.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{KeyringError, KeyringResult};

/// How byte fields are encoded in a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    /// JSON array of unsigned byte values, e.g. `[12,7,255]`
    #[default]
    ByteArray,
    /// Standard base64 with padding
    Base64,
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByteArray => write!(f, "byte-array"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

/// Encode bytes as a field string
pub fn encode_field(bytes: &[u8], format: WireFormat) -> KeyringResult<String> {
    match format {
        WireFormat::ByteArray => Ok(serde_json::to_string(bytes)?),
        WireFormat::Base64 => Ok(STANDARD.encode(bytes)),
    }
}

/// Decode a field string back to bytes
///
/// `field` names the record field in error messages.
pub fn decode_field(encoded: &str, field: &'static str) -> KeyringResult<Vec<u8>> {
    let trimmed = encoded.trim();

    if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<u8>>(trimmed)
            .map_err(|e| KeyringError::Serialization(format!("Invalid {} byte array: {}", field, e)))
    } else if trimmed.starts_with('{') {
        decode_indexed_object(trimmed, field)
    } else {
        STANDARD
            .decode(trimmed)
            .map_err(|e| KeyringError::Serialization(format!("Invalid {} encoding: {}", field, e)))
    }
}

fn decode_indexed_object(encoded: &str, field: &'static str) -> KeyringResult<Vec<u8>> {
    let raw: BTreeMap<String, u8> = serde_json::from_str(encoded)
        .map_err(|e| KeyringError::Serialization(format!("Invalid {} byte object: {}", field, e)))?;

    let mut indexed = BTreeMap::new();
    for (index, byte) in raw {
        let index: usize = index.parse().map_err(|_| {
            KeyringError::Serialization(format!("Invalid {} byte index: {:?}", field, index))
        })?;
        indexed.insert(index, byte);
    }

    // Indices must be exactly 0..len
    if indexed.keys().enumerate().any(|(expected, &index)| expected != index) {
        return Err(KeyringError::Serialization(format!(
            "Invalid {} byte object: indices are not contiguous",
            field
        )));
    }

    Ok(indexed.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_array_encoding() {
        let encoded = encode_field(&[0, 7, 255], WireFormat::ByteArray).unwrap();
        assert_eq!(encoded, "[0,7,255]");
        assert_eq!(decode_field(&encoded, "nonce").unwrap(), vec![0, 7, 255]);
    }

    #[test]
    fn test_base64_encoding() {
        let encoded = encode_field(b"hello", WireFormat::Base64).unwrap();
        assert_eq!(encoded, "aGVsbG8=");
        assert_eq!(decode_field(&encoded, "contents").unwrap(), b"hello");
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(encode_field(&[], WireFormat::ByteArray).unwrap(), "[]");
        assert!(decode_field("[]", "nonce").unwrap().is_empty());
        assert!(decode_field("", "nonce").unwrap().is_empty());
    }

    #[test]
    fn test_indexed_object() {
        let decoded = decode_field(r#"{"0":12,"1":7,"2":200}"#, "nonce").unwrap();
        assert_eq!(decoded, vec![12, 7, 200]);
    }

    #[test]
    fn test_indexed_object_sorts_numerically() {
        let encoded: String = {
            let pairs: Vec<String> = (0..12).map(|i| format!("\"{}\":{}", i, i * 2)).collect();
            format!("{{{}}}", pairs.join(","))
        };
        let decoded = decode_field(&encoded, "nonce").unwrap();
        let expected: Vec<u8> = (0..12).map(|i| i * 2).collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_indexed_object_with_gap_rejected() {
        let err = decode_field(r#"{"0":1,"2":3}"#, "nonce").unwrap_err();
        assert!(matches!(err, KeyringError::Serialization(_)));
    }

    #[test]
    fn test_out_of_range_byte_rejected() {
        let err = decode_field("[1,256]", "contents").unwrap_err();
        assert!(matches!(err, KeyringError::Serialization(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        let err = decode_field("not base64!!", "contents").unwrap_err();
        assert!(matches!(err, KeyringError::Serialization(_)));
    }

    #[test]
    fn test_format_serde_names() {
        assert_eq!(
            serde_json::to_string(&WireFormat::ByteArray).unwrap(),
            "\"byte_array\""
        );
        assert_eq!(
            serde_json::from_str::<WireFormat>("\"base64\"").unwrap(),
            WireFormat::Base64
        );
    }
}
