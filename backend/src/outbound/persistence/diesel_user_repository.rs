//! PostgreSQL-backed identity repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{AccountFlags, Email, HashedPassword, UserAccount, UserId};

use super::diesel_helpers::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use recipe_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
    /// let repository = DieselUserRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let email = Email::new(row.email).map_err(|err| {
        warn!(user_id = %row.id, "stored email failed validation: {err}");
        UserPersistenceError::query(format!("invalid stored email: {err}"))
    })?;
    Ok(UserAccount::from_parts(
        UserId::from_uuid(row.id),
        email,
        row.name,
        AccountFlags {
            is_active: row.is_active,
            is_staff: row.is_staff,
        },
        HashedPassword::from_stored(row.password_hash),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let user = account.user();
        let flags = account.flags();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            name: user.name(),
            password_hash: account.password_hash().as_str(),
            is_active: flags.is_active,
            is_staff: flags.is_staff,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_email(user.email().as_ref())
                } else {
                    diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn update(&self, account: &UserAccount) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let user = account.user();
        let changes = UserProfileUpdate {
            name: user.name(),
            password_hash: account.password_hash().as_str(),
        };

        let updated = diesel::update(users::table.filter(users::id.eq(user.id().as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }
}
