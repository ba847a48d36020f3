//! Credential input for CLI commands
//!
//! Email and password come from flags or environment variables when given,
//! otherwise from interactive prompts. Passwords are read without echo.

use std::io::Write;

use clap::Args;

use crate::crypto::SecureString;
use crate::error::{KeyringError, KeyringResult};

/// Credential flags shared by every vault command
#[derive(Args, Clone, Default)]
pub struct CredentialArgs {
    /// Account email
    #[arg(long, global = true, env = "KEYRING_EMAIL")]
    pub email: Option<String>,

    /// Account password (prompted for when omitted)
    #[arg(long, global = true, env = "KEYRING_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Resolved email and password
pub struct Credentials {
    pub email: String,
    pub password: SecureString,
}

impl CredentialArgs {
    /// Resolve credentials for signing in
    pub fn resolve(&self) -> KeyringResult<Credentials> {
        let email = self.resolve_email()?;
        let password = match &self.password {
            Some(password) => SecureString::new(password.as_str()),
            None => prompt_password("Password: ")?,
        };
        Ok(Credentials { email, password })
    }

    /// Resolve credentials for registration
    ///
    /// A prompted password must be entered twice and meet `min_length`.
    pub fn resolve_new(&self, min_length: usize) -> KeyringResult<Credentials> {
        let email = self.resolve_email()?;
        let password = match &self.password {
            Some(password) => SecureString::new(password.as_str()),
            None => prompt_new_password(min_length)?,
        };

        check_password_length(&password, min_length)?;
        Ok(Credentials { email, password })
    }

    fn resolve_email(&self) -> KeyringResult<String> {
        let email = match &self.email {
            Some(email) => email.trim().to_string(),
            None => prompt_line("Email: ")?,
        };

        if email.is_empty() {
            return Err(KeyringError::Validation("Email cannot be empty".to_string()));
        }
        Ok(email)
    }
}

/// Reject passwords shorter than `min_length` characters
pub fn check_password_length(password: &SecureString, min_length: usize) -> KeyringResult<()> {
    if password.char_count() < min_length {
        return Err(KeyringError::Validation(format!(
            "Passwords must be at least {} characters long.",
            min_length
        )));
    }
    Ok(())
}

/// Prompt for a new password with confirmation
fn prompt_new_password(min_length: usize) -> KeyringResult<SecureString> {
    loop {
        let pass1 = prompt_password("Choose a password: ")?;

        if check_password_length(&pass1, min_length).is_err() {
            println!(
                "Passwords must be at least {} characters long. Please try again.",
                min_length
            );
            continue;
        }

        let pass2 = prompt_password("Confirm password: ")?;

        if pass1 != pass2 {
            println!("Passwords do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> KeyringResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| KeyringError::Io(format!("Failed to read password: {}", e)))
}

/// Ask a yes/no question; anything but `y` or `yes` is a no
pub fn confirm(prompt: &str) -> KeyringResult<bool> {
    let answer = prompt_line(prompt)?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

fn prompt_line(prompt: &str) -> KeyringResult<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
