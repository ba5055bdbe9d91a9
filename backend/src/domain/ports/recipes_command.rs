//! Driving port for recipe mutations.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeChanges, RecipeDraft, RecipeId, UpdateMode, UserId};

/// Command port for creating, updating and deleting owned recipes.
///
/// The acting identity is always the owner. Recipes owned by anyone else are
/// reported as `not_found`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    async fn create(&self, owner: &UserId, draft: RecipeDraft) -> Result<Recipe, Error>;

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: RecipeChanges,
        mode: UpdateMode,
    ) -> Result<Recipe, Error>;

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<(), Error>;
}
