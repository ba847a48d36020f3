//! Path management for KeyRing
//!
//! ## Path Resolution Order
//!
//! 1. `KEYRING_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/keyring` or `~/.config/keyring`
//! 3. Windows: `%APPDATA%\keyring`

use std::path::PathBuf;

use crate::error::KeyringError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "KEYRING_DATA_DIR";

/// Manages all paths used by KeyRing
#[derive(Debug, Clone)]
pub struct KeyringPaths {
    base_dir: PathBuf,
}

impl KeyringPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, KeyringError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create KeyringPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory holding one encrypted record per account
    pub fn records_dir(&self) -> PathBuf {
        self.data_dir().join("records")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the local account directory
    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), KeyringError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KeyringError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.records_dir())
            .map_err(|e| KeyringError::Io(format!("Failed to create records directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, KeyringError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                KeyringError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("keyring"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, KeyringError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| KeyringError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("keyring"))
}
