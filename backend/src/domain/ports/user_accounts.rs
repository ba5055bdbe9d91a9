//! Driving ports for account registration and profile management.

use async_trait::async_trait;

use crate::domain::{Email, Error, Password, User, UserId};

/// Request to register a new identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub email: Email,
    pub password: Password,
    pub name: String,
}

/// Profile fields the owner may change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<Password>,
}

/// Command port for creating and editing identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountsCommand: Send + Sync {
    /// Create an identity; the password is hashed before it is stored.
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// Update the acting identity's profile.
    async fn update_profile(
        &self,
        user_id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, Error>;
}

/// Query port returning the acting identity's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    async fn profile(&self, user_id: &UserId) -> Result<User, Error>;
}
