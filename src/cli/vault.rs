//! Vault CLI commands
//!
//! Every command signs in, loads the vault, applies its change and syncs the
//! re-encrypted vault back to the record store.

use clap::Subcommand;
use tracing::debug;

use crate::auth::{sign_in_or_register, Authenticator, LocalAuthenticator};
use crate::config::{KeyringPaths, Settings};
use crate::display::{format_group, format_vault};
use crate::error::{KeyringError, KeyringResult};
use crate::models::Vault;
use crate::services::Keyring;
use crate::session::Session;
use crate::storage::FileStore;

use super::credentials::{check_password_length, confirm, CredentialArgs};

/// Vault subcommands
#[derive(Subcommand)]
pub enum VaultCommands {
    /// Show stored groups and entries
    #[command(alias = "ls")]
    Show {
        /// Only show this group
        group: Option<String>,
    },

    /// Add an empty group
    AddGroup {
        /// Group name
        group: String,
    },

    /// Set an entry, creating its group if needed
    Set {
        /// Group name
        group: String,
        /// Entry key
        key: String,
        /// Entry value
        value: String,
    },

    /// Replace a group's entries with KEY=VALUE pairs
    Edit {
        /// Group name
        group: String,
        /// Entries as KEY=VALUE; pairs with an empty key are dropped
        entries: Vec<String>,
    },

    /// Remove an entry, or a whole group when no key is given
    #[command(alias = "rm")]
    Remove {
        /// Group name
        group: String,
        /// Entry key
        key: Option<String>,
    },
}

/// Handle the register command
pub fn handle_register_command(
    paths: &KeyringPaths,
    settings: &Settings,
    credentials: &CredentialArgs,
) -> KeyringResult<()> {
    paths.ensure_directories()?;
    let auth = LocalAuthenticator::open(paths.accounts_file())?;

    let creds = credentials.resolve_new(settings.min_password_length)?;
    let identity = auth.register(&creds.email, &creds.password)?;
    auth.sign_out()?;

    println!("Registered account for {}", identity.email);
    println!("Account id: {}", identity.account_id);
    Ok(())
}

/// Handle a vault command
pub fn handle_vault_command(
    paths: &KeyringPaths,
    settings: &Settings,
    credentials: &CredentialArgs,
    cmd: VaultCommands,
) -> KeyringResult<()> {
    paths.ensure_directories()?;
    let auth = LocalAuthenticator::open(paths.accounts_file())?;
    let keyring = Keyring::from_settings(FileStore::new(paths.records_dir()), settings);

    let session = sign_in(&auth, settings, credentials)?;
    let result = run(&keyring, &session, cmd);
    auth.sign_out()?;
    result
}

/// Sign in, offering to register an unknown email
///
/// The vault key is derived from the email as registered, not as typed.
fn sign_in(
    auth: &LocalAuthenticator,
    settings: &Settings,
    credentials: &CredentialArgs,
) -> KeyringResult<Session> {
    let creds = credentials.resolve()?;
    let signed_in = sign_in_or_register(auth, &creds.email, &creds.password, |email| {
        let prompt = format!("No account found for {}. Register it now? [y/N] ", email);
        if !confirm(&prompt)? {
            return Ok(false);
        }
        check_password_length(&creds.password, settings.min_password_length)?;
        Ok(true)
    });

    let (identity, created) = signed_in.map_err(|e| {
        if e.is_user_not_found() {
            eprintln!("Run 'keyring register' to create an account.");
        }
        e
    })?;

    if created {
        println!("Registered account for {}", identity.email);
    }

    debug!(account = %identity.account_id, "deriving vault key");
    Ok(Session::establish(
        identity.account_id,
        &identity.email,
        &creds.password,
    ))
}

fn run(
    keyring: &Keyring<FileStore>,
    session: &Session,
    cmd: VaultCommands,
) -> KeyringResult<()> {
    let mut vault = keyring.load(session)?;

    match cmd {
        VaultCommands::Show { group } => show(&vault, group.as_deref())?,
        VaultCommands::AddGroup { group } => {
            if vault.add_group(&group)? {
                keyring.sync(session, &vault)?;
                println!("Added group '{}'", group);
            } else {
                println!("Group '{}' already exists", group);
            }
        }
        VaultCommands::Set { group, key, value } => {
            let previous = vault.set_entry(&group, &key, &value)?;
            keyring.sync(session, &vault)?;
            if previous.is_some() {
                println!("Updated '{}' in '{}'", key, group);
            } else {
                println!("Added '{}' to '{}'", key, group);
            }
        }
        VaultCommands::Edit { group, entries } => {
            let pairs = parse_pairs(&entries)?;
            if pairs.is_empty() {
                println!("No entries given, '{}' left unchanged", group);
                return Ok(());
            }
            vault.apply_edits(&group, pairs)?;
            keyring.sync(session, &vault)?;
            let count = vault.group(&group).map_or(0, |g| g.len());
            println!("Saved '{}' ({} entries)", group, count);
        }
        VaultCommands::Remove { group, key } => {
            remove(&mut vault, &group, key.as_deref())?;
            keyring.sync(session, &vault)?;
        }
    }

    Ok(())
}

/// Split `KEY=VALUE` arguments at the first `=`
fn parse_pairs(entries: &[String]) -> KeyringResult<Vec<(String, String)>> {
    entries
        .iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .ok_or_else(|| {
                    KeyringError::Validation(format!("Expected KEY=VALUE, got '{}'", entry))
                })
        })
        .collect()
}

fn show(vault: &Vault, group: Option<&str>) -> KeyringResult<()> {
    match group {
        Some(name) => {
            let entries = vault
                .group(name)
                .ok_or_else(|| KeyringError::group_not_found(name))?;
            print!("{}", format_group(name, entries));
        }
        None => print!("{}", format_vault(vault)),
    }
    Ok(())
}

fn remove(vault: &mut Vault, group: &str, key: Option<&str>) -> KeyringResult<()> {
    match key {
        Some(key) => {
            if vault.group(group).is_none() {
                return Err(KeyringError::group_not_found(group));
            }
            vault
                .remove_entry(group, key)
                .ok_or_else(|| KeyringError::entry_not_found(group, key))?;
            println!("Removed '{}' from '{}'", key, group);
        }
        None => {
            let removed = vault
                .remove_group(group)
                .ok_or_else(|| KeyringError::group_not_found(group))?;
            println!("Removed group '{}' ({} entries)", group, removed.len());
        }
    }
    Ok(())
}
