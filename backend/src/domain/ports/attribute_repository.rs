//! Driven port for tag and ingredient persistence.

use async_trait::async_trait;

use crate::domain::{AttributeId, AttributeKind, AttributeName, RecipeAttribute, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by attribute repository adapters.
    pub enum AttributeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "attribute repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "attribute repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttributeRepository: Send + Sync {
    /// Owned attributes of `kind`, ordered by name then id.
    ///
    /// With `assigned_only` set, only attributes linked to at least one recipe
    /// are returned.
    async fn list(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        assigned_only: bool,
    ) -> Result<Vec<RecipeAttribute>, AttributeRepositoryError>;

    /// Fetch one owned attribute.
    async fn find(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<Option<RecipeAttribute>, AttributeRepositoryError>;

    /// Insert a new attribute. Duplicate names are allowed.
    async fn create(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        name: &AttributeName,
    ) -> Result<RecipeAttribute, AttributeRepositoryError>;

    /// Rename an owned attribute. `None` when it is not in scope.
    async fn rename(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
        name: &AttributeName,
    ) -> Result<Option<RecipeAttribute>, AttributeRepositoryError>;

    /// Delete an owned attribute and its recipe links. `false` when not in scope.
    async fn delete(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<bool, AttributeRepositoryError>;
}
