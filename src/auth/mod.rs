//! Authentication collaborator
//!
//! The vault only needs an account id and the registered email out of
//! authentication. The [`Authenticator`] trait is the narrow interface to
//! whichever backend issues them; [`LocalAuthenticator`] keeps accounts in a
//! JSON file.

pub mod local;

pub use local::LocalAuthenticator;

use tracing::info;

use crate::error::{AuthError, KeyringError, KeyringResult};
use crate::models::AccountId;

/// The account a successful sign-in resolved to
///
/// `email` is the address as it was registered, which may differ in case from
/// what was typed at sign-in. Vault keys are derived from this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: AccountId,
    pub email: String,
}

/// A backend that signs users in and hands out account ids
pub trait Authenticator {
    /// Sign in with existing credentials
    ///
    /// Fails with [`AuthError::UserNotFound`] when no account has this email,
    /// so callers can offer registration instead.
    fn sign_in(&self, email: &str, password: &str) -> KeyringResult<Identity>;

    /// Register a new account and sign it in
    fn register(&self, email: &str, password: &str) -> KeyringResult<Identity>;

    /// Sign the current account out
    fn sign_out(&self) -> KeyringResult<()>;
}

/// Sign in, falling back to registration when the account does not exist
///
/// On `UserNotFound`, `confirm_register` is asked whether to register
/// `email`. A refusal returns the original `UserNotFound` error. Returns the
/// identity and whether a new account was created.
pub fn sign_in_or_register<A, F>(
    auth: &A,
    email: &str,
    password: &str,
    confirm_register: F,
) -> KeyringResult<(Identity, bool)>
where
    A: Authenticator + ?Sized,
    F: FnOnce(&str) -> KeyringResult<bool>,
{
    match auth.sign_in(email, password) {
        Ok(identity) => Ok((identity, false)),
        Err(KeyringError::Auth(AuthError::UserNotFound(missing))) => {
            if !confirm_register(&missing)? {
                return Err(AuthError::UserNotFound(missing).into());
            }
            info!("no account found, registering");
            let identity = auth.register(email, password)?;
            Ok((identity, true))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_auth() -> (TempDir, LocalAuthenticator) {
        let temp_dir = TempDir::new().unwrap();
        let auth = LocalAuthenticator::open(temp_dir.path().join("accounts.json")).unwrap();
        (temp_dir, auth)
    }

    #[test]
    fn test_unknown_user_not_registered_when_declined() {
        let (_temp_dir, auth) = create_auth();
        let err = sign_in_or_register(&auth, "a@b.com", "password1", |_| Ok(false)).unwrap_err();
        assert!(err.is_user_not_found());
        assert!(auth.sign_in("a@b.com", "password1").unwrap_err().is_user_not_found());
    }

    #[test]
    fn test_unknown_user_registered_when_confirmed() {
        let (_temp_dir, auth) = create_auth();
        let mut asked = None;
        let (identity, created) = sign_in_or_register(&auth, "a@b.com", "password1", |email| {
            asked = Some(email.to_string());
            Ok(true)
        })
        .unwrap();
        assert!(created);
        assert_eq!(asked.as_deref(), Some("a@b.com"));

        let (again, created) =
            sign_in_or_register(&auth, "a@b.com", "password1", |_| Ok(true)).unwrap();
        assert!(!created);
        assert_eq!(identity, again);
    }

    #[test]
    fn test_confirmation_not_asked_for_existing_account() {
        let (_temp_dir, auth) = create_auth();
        auth.register("a@b.com", "password1").unwrap();

        let (_, created) = sign_in_or_register(&auth, "a@b.com", "password1", |_| {
            panic!("existing accounts must not trigger registration")
        })
        .unwrap();
        assert!(!created);
    }

    #[test]
    fn test_confirmation_error_propagates() {
        let (_temp_dir, auth) = create_auth();
        let err = sign_in_or_register(&auth, "a@b.com", "password1", |_| {
            Err(KeyringError::Validation("too short".into()))
        })
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_wrong_password_never_registers() {
        let (_temp_dir, auth) = create_auth();
        auth.register("a@b.com", "password1").unwrap();

        let err = sign_in_or_register(&auth, "a@b.com", "wrongpass", |_| Ok(true)).unwrap_err();
        assert!(matches!(err, KeyringError::Auth(AuthError::WrongPassword)));
    }
}
