//! Authentication primitives such as login credentials.
//!
//! Inbound adapters build these from raw payload strings before calling the
//! accounts port, so the domain only ever sees validated shapes.

use super::password::Password;
use super::user::{Email, UserValidationError};

/// Errors raised while validating a login payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    #[error("{0}")]
    Email(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is normalised the same way stored identities are.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use recipe_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Cook@Example.com", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "Cook@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Password::presented(password),
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password presented by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}
