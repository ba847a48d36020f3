//! Display formatting for terminal output

pub mod vault;

pub use vault::{format_group, format_vault, EMPTY_VAULT_MESSAGE};
