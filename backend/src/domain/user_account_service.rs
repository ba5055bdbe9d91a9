//! Identity services: registration, authentication and profile management.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, RegisterUserRequest, UpdateProfileRequest, UserAccountsCommand,
    UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{
    Error, HashedPassword, LoginCredentials, Password, User, UserAccount, UserId,
    validate_user_name,
};

/// Account service implementing the identity driving ports.
#[derive(Clone)]
pub struct UserAccountService<R> {
    repo: Arc<R>,
}

impl<R> UserAccountService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::invalid_request("email is already registered")
                .with_details(json!({ "field": "email", "code": "email_taken" }))
        }
    }
}

fn hash_password(password: &Password) -> Result<HashedPassword, Error> {
    HashedPassword::hash(password).map_err(|err| Error::internal(err.to_string()))
}

fn check_name(name: &str) -> Result<(), Error> {
    validate_user_name(name).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "name" }))
    })
}

impl<R: UserRepository> UserAccountService<R> {
    async fn load(&self, user_id: &UserId) -> Result<UserAccount, Error> {
        // A session may outlive its account only if storage was reset.
        self.repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }
}

#[async_trait]
impl<R: UserRepository> LoginService for UserAccountService<R> {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .repo
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;

        let Some(account) = account else {
            debug!("login attempt for unknown email");
            return Err(Error::unauthorized("invalid credentials"));
        };
        if !account.password_hash().verify(credentials.password()) {
            debug!(user_id = %account.user().id(), "login attempt with wrong password");
            return Err(Error::unauthorized("invalid credentials"));
        }
        if !account.user().is_active() {
            return Err(Error::forbidden("account is inactive"));
        }
        Ok(account.user().id().clone())
    }
}

#[async_trait]
impl<R: UserRepository> UserAccountsCommand for UserAccountService<R> {
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let RegisterUserRequest {
            email,
            password,
            name,
        } = request;
        check_name(&name)?;

        let hash = hash_password(&password)?;
        let account = UserAccount::register(email, name, hash);
        self.repo.insert(&account).await.map_err(map_user_error)?;

        info!(user_id = %account.user().id(), "registered user");
        Ok(account.into_user())
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, Error> {
        let mut account = self.load(user_id).await?;
        if let Some(name) = request.name {
            check_name(&name)?;
            account.set_name(name);
        }
        if let Some(password) = request.password {
            account.set_password_hash(hash_password(&password)?);
        }

        let updated = self.repo.update(&account).await.map_err(map_user_error)?;
        if !updated {
            return Err(Error::unauthorized("session user no longer exists"));
        }
        Ok(account.into_user())
    }
}

#[async_trait]
impl<R: UserRepository> UserProfileQuery for UserAccountService<R> {
    async fn profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.load(user_id).await.map(UserAccount::into_user)
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
