//! CLI command handlers
//!
//! Bridges clap argument parsing with the vault service.

pub mod credentials;
pub mod vault;

pub use credentials::{CredentialArgs, Credentials};
pub use vault::{handle_register_command, handle_vault_command, VaultCommands};
