//! Vault content model
//!
//! A vault is a two-level mapping: group name to a mapping of entry key to
//! entry value. It serializes as a plain JSON object so records stay readable
//! by any client that decrypts them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::KeyringError;

/// Maximum length of a group name, in characters
pub const MAX_GROUP_NAME_LEN: usize = 32;

/// Entries of a single group
pub type Group = BTreeMap<String, String>;

/// The decrypted contents of an account's vault
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vault {
    groups: BTreeMap<String, Group>,
}

impl Vault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the vault holds no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of entries across all groups
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    /// Iterate groups in name order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Get a group by name
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Get an entry value
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups
            .get(group)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Add an empty group
    ///
    /// An existing group is kept as is. Returns whether the group was created.
    pub fn add_group(&mut self, name: &str) -> Result<bool, VaultValidationError> {
        validate_group_name(name)?;
        if self.groups.contains_key(name) {
            return Ok(false);
        }
        self.groups.insert(name.to_string(), Group::new());
        Ok(true)
    }

    /// Remove a group and all its entries
    pub fn remove_group(&mut self, name: &str) -> Option<Group> {
        self.groups.remove(name)
    }

    /// Set an entry, creating the group if needed
    ///
    /// Returns the previous value, if any.
    pub fn set_entry(
        &mut self,
        group: &str,
        key: &str,
        value: &str,
    ) -> Result<Option<String>, VaultValidationError> {
        validate_group_name(group)?;
        if key.is_empty() {
            return Err(VaultValidationError::EmptyKey);
        }

        Ok(self
            .groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string()))
    }

    /// Remove an entry. The group itself is kept even when it becomes empty.
    pub fn remove_entry(&mut self, group: &str, key: &str) -> Option<String> {
        self.groups.get_mut(group).and_then(|entries| entries.remove(key))
    }

    /// Replace a group's entries with edited key/value pairs
    ///
    /// Pairs with an empty key are skipped. When `pairs` is empty the group is
    /// left untouched, matching how an unedited group is synced.
    pub fn apply_edits<I, K, V>(&mut self, group: &str, pairs: I) -> Result<(), VaultValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        validate_group_name(group)?;

        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_none() {
            return Ok(());
        }

        let entries: Group = pairs
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        self.groups.insert(group.to_string(), entries);
        Ok(())
    }
}

fn validate_group_name(name: &str) -> Result<(), VaultValidationError> {
    if name.trim().is_empty() {
        return Err(VaultValidationError::EmptyGroupName);
    }

    let len = name.chars().count();
    if len > MAX_GROUP_NAME_LEN {
        return Err(VaultValidationError::GroupNameTooLong(len));
    }

    Ok(())
}

/// Validation errors for vault edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultValidationError {
    EmptyGroupName,
    GroupNameTooLong(usize),
    EmptyKey,
}

impl fmt::Display for VaultValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGroupName => write!(f, "Group name cannot be empty"),
            Self::GroupNameTooLong(len) => write!(
                f,
                "Group name too long ({} characters, max {})",
                len, MAX_GROUP_NAME_LEN
            ),
            Self::EmptyKey => write!(f, "Entry key cannot be empty"),
        }
    }
}

impl std::error::Error for VaultValidationError {}

impl From<VaultValidationError> for KeyringError {
    fn from(err: VaultValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
