//! User identity model.
//!
//! Identities are created through [`UserAccount::register`] and never deleted.
//! Email addresses are normalised by lower-casing the domain portion only; the
//! local portion keeps its case.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::password::HashedPassword;

/// Maximum stored length of an email address.
pub const EMAIL_MAX: usize = 255;
/// Maximum stored length of a display name.
pub const USER_NAME_MAX: usize = 255;

/// Validation errors raised while constructing identity values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must look like local@domain")]
    InvalidEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID, typically read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Normalised email address used as the login identifier.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Email;
///
/// let email = Email::new("Test2@Example.com").expect("valid email");
/// assert_eq!(email.as_ref(), "Test2@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate and normalise an email address.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        // Whitespace anywhere, including padding, fails the pattern.
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }

        let (local, domain) = email
            .rsplit_once('@')
            .ok_or(UserValidationError::InvalidEmail)?;
        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Validate a display name. Names may be empty.
pub fn validate_user_name(name: &str) -> Result<(), UserValidationError> {
    if name.chars().count() > USER_NAME_MAX {
        return Err(UserValidationError::NameTooLong {
            max: USER_NAME_MAX,
        });
    }
    Ok(())
}

/// Public view of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "cook@example.com")]
    email: Email,
    #[schema(example = "Ada Lovelace")]
    name: String,
    is_active: bool,
    is_staff: bool,
}

impl User {
    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Normalised email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Display name; may be empty.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Whether the identity may authenticate.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether the identity carries operator privileges.
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.email.as_ref())
    }
}

/// Persisted identity: the public view plus the salted password hash.
///
/// Adapters round-trip accounts through [`UserAccount::from_parts`]; the hash
/// never leaves the domain through [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password_hash: HashedPassword,
}

impl UserAccount {
    /// Build a brand new active, non-staff account.
    pub fn register(email: Email, name: impl Into<String>, password_hash: HashedPassword) -> Self {
        Self {
            user: User {
                id: UserId::random(),
                email,
                name: name.into(),
                is_active: true,
                is_staff: false,
            },
            password_hash,
        }
    }

    /// Rehydrate an account from stored columns.
    pub fn from_parts(
        id: UserId,
        email: Email,
        name: String,
        flags: AccountFlags,
        password_hash: HashedPassword,
    ) -> Self {
        Self {
            user: User {
                id,
                email,
                name,
                is_active: flags.is_active,
                is_staff: flags.is_staff,
            },
            password_hash,
        }
    }

    /// Public view of the account.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Consume the account, keeping only the public view.
    pub fn into_user(self) -> User {
        self.user
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }

    /// Replace the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.user.name = name.into();
    }

    /// Replace the stored password hash.
    pub fn set_password_hash(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
    }

    /// Current account flags.
    pub fn flags(&self) -> AccountFlags {
        AccountFlags {
            is_active: self.user.is_active,
            is_staff: self.user.is_staff,
        }
    }
}

/// Activity and privilege flags stored alongside an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountFlags {
    pub is_active: bool,
    pub is_staff: bool,
}

impl Default for AccountFlags {
    fn default() -> Self {
        Self {
            is_active: true,
            is_staff: false,
        }
    }
}
