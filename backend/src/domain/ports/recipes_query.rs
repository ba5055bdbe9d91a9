//! Driving port for recipe reads.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeFilter, RecipeId, UserId};

/// Query port over the acting identity's recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// Owned recipes, most recent first.
    async fn list(&self, owner: &UserId, filter: RecipeFilter) -> Result<Vec<Recipe>, Error>;

    async fn get(&self, owner: &UserId, id: RecipeId) -> Result<Recipe, Error>;
}
