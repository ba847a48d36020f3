//! Vault display formatting
//!
//! Formats decrypted vault content for terminal output, one block per group.

use crate::models::{Group, Vault};

/// Message shown when a vault holds nothing
pub const EMPTY_VAULT_MESSAGE: &str = "You have no data in storage.";

/// Format every group in the vault
pub fn format_vault(vault: &Vault) -> String {
    if vault.is_empty() {
        return format!("{}\n", EMPTY_VAULT_MESSAGE);
    }

    let mut output = String::new();
    for (i, (name, group)) in vault.groups().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format_group(name, group));
    }

    output.push_str(&format!(
        "\n{} group(s), {} entr{}\n",
        vault.group_count(),
        vault.entry_count(),
        if vault.entry_count() == 1 { "y" } else { "ies" }
    ));
    output
}

/// Format a single group as an aligned key/value list
pub fn format_group(name: &str, group: &Group) -> String {
    let mut output = String::new();
    output.push_str(name);
    output.push('\n');
    output.push_str(&"=".repeat(name.chars().count().max(4)));
    output.push('\n');

    if group.is_empty() {
        output.push_str("  (no entries)\n");
        return output;
    }

    let key_width = group
        .keys()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(3)
        .max(3);

    for (key, value) in group {
        output.push_str(&format!(
            "  {:<key_width$}  {}\n",
            key,
            value,
            key_width = key_width
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_vault() {
        assert_eq!(format_vault(&Vault::new()), "You have no data in storage.\n");
    }

    #[test]
    fn test_group_alignment() {
        let mut vault = Vault::new();
        vault.set_entry("email", "gmail", "secret1").unwrap();
        vault.set_entry("email", "work-outlook", "secret2").unwrap();

        let output = format_group("email", vault.group("email").unwrap());
        assert!(output.starts_with("email\n=====\n"));
        assert!(output.contains("  gmail         secret1\n"));
        assert!(output.contains("  work-outlook  secret2\n"));
    }

    #[test]
    fn test_empty_group() {
        let mut vault = Vault::new();
        vault.add_group("bank").unwrap();

        let output = format_vault(&vault);
        assert!(output.contains("bank\n====\n  (no entries)\n"));
        assert!(output.contains("1 group(s), 0 entries"));
    }

    #[test]
    fn test_summary_line() {
        let mut vault = Vault::new();
        vault.set_entry("email", "gmail", "secret1").unwrap();
        vault.set_entry("bank", "pin", "0000").unwrap();

        let output = format_vault(&vault);
        assert!(output.ends_with("2 group(s), 2 entries\n"));
        // Groups are listed in name order
        assert!(output.find("bank").unwrap() < output.find("email").unwrap());
    }
}
