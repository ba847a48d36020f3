//! User settings for KeyRing
//!
//! Controls the record wire format, the nonce length for new records, the
//! registration password minimum and the default log level.

use serde::{Deserialize, Serialize};

use super::paths::KeyringPaths;
use crate::crypto::{NonceLength, WireFormat};
use crate::error::KeyringError;

/// User settings for KeyRing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Encoding of record fields written to the store
    #[serde(default)]
    pub wire_format: WireFormat,

    /// Nonce length for newly written records
    #[serde(default)]
    pub nonce_length: NonceLength,

    /// Minimum password length accepted when registering
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Log filter used when neither RUST_LOG nor --verbose is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_min_password_length() -> usize {
    8
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            wire_format: WireFormat::default(),
            nonce_length: NonceLength::default(),
            min_password_length: default_min_password_length(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &KeyringPaths) -> Result<Self, KeyringError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                KeyringError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                KeyringError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &KeyringPaths) -> Result<(), KeyringError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            KeyringError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| KeyringError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.wire_format, WireFormat::ByteArray);
        assert_eq!(settings.nonce_length, NonceLength::Standard);
        assert_eq!(settings.min_password_length, 8);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KeyringPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            wire_format: WireFormat::Base64,
            nonce_length: NonceLength::Extended,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"wire_format":"base64"}"#).unwrap();
        assert_eq!(settings.wire_format, WireFormat::Base64);
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.min_password_length, 8);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KeyringPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, KeyringError::Config(_)));
    }
}
