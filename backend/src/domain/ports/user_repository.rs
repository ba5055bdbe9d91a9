//! Port abstraction for identity persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the normalised email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` when the email is taken.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Persist name and password hash changes for an existing account.
    ///
    /// Returns `false` when no account with that id exists.
    async fn update(&self, account: &UserAccount) -> Result<bool, UserPersistenceError>;
}
