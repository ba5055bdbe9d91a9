//! Driven port for recipe persistence.
//!
//! Every method takes the owner explicitly; adapters must filter on it so a
//! recipe owned by someone else behaves exactly like a missing one.

use async_trait::async_trait;

use crate::domain::{Recipe, RecipeChanges, RecipeDraft, RecipeFilter, RecipeId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "recipe repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Owned recipes matching `filter`, newest first.
    async fn list(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Fetch one owned recipe.
    async fn find(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Insert a recipe, resolving attribute names within the owner's namespace.
    ///
    /// Unknown names are created and known names reused, atomically with the
    /// recipe row.
    async fn create(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeRepositoryError>;

    /// Apply changes to an owned recipe. `None` when it is not in scope.
    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Delete an owned recipe. `false` when it is not in scope.
    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError>;
}
