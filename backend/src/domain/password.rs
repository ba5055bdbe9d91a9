//! Password handling: plaintext wrapper and salted argon2 hashes.
//!
//! Plaintext passwords live in [`Zeroizing`] buffers and are scrubbed on drop.
//! Only the PHC-formatted hash string is ever persisted.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use zeroize::Zeroizing;

/// Validation errors for plaintext passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordValidationError {
    #[error("password must not be empty")]
    Empty,
}

/// Failure while deriving a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Plaintext password supplied by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept a new password chosen by the user. Only emptiness is rejected.
    pub fn new(raw: &str) -> Result<Self, PasswordValidationError> {
        if raw.is_empty() {
            return Err(PasswordValidationError::Empty);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Wrap a password presented for verification. No policy is applied.
    pub(crate) fn presented(raw: &str) -> Self {
        Self(Zeroizing::new(raw.to_owned()))
    }

    /// Borrow the plaintext.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Salted argon2id hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hash `password` with a fresh random salt.
    pub fn hash(password: &Password) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHashError {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a hash string read back from storage.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Check `password` against the stored hash.
    ///
    /// Malformed stored hashes never verify.
    pub fn verify(&self, password: &Password) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            tracing::warn!("stored password hash is malformed");
            return false;
        };
        Argon2::default()
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok()
    }

    /// PHC string for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(***)")
    }
}
