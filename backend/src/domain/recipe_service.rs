//! Recipe domain service.
//!
//! Implements the recipe driving ports on top of any [`RecipeRepository`].
//! Ownership always comes from the acting identity passed by the caller.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ownership::{deleted_or_not_found, owned_or_not_found};
use crate::domain::ports::{RecipeRepository, RecipeRepositoryError, RecipesCommand, RecipesQuery};
use crate::domain::{
    Error, Recipe, RecipeChanges, RecipeDraft, RecipeFilter, RecipeId, RecipeValidationError,
    UpdateMode, UserId, unique_names,
};

const RESOURCE: &str = "recipe";

fn missing_field(err: RecipeValidationError) -> Error {
    let error = Error::invalid_request(err.to_string());
    match err {
        RecipeValidationError::MissingField { field } => {
            error.with_details(json!({ "field": field, "code": "missing_field" }))
        }
        _ => error,
    }
}

/// Recipe service implementing [`RecipesCommand`] and [`RecipesQuery`].
#[derive(Clone)]
pub struct RecipeService<R> {
    repo: Arc<R>,
}

impl<R> RecipeService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_recipe_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R: RecipeRepository> RecipesQuery for RecipeService<R> {
    async fn list(&self, owner: &UserId, filter: RecipeFilter) -> Result<Vec<Recipe>, Error> {
        self.repo
            .list(owner, &filter)
            .await
            .map_err(map_recipe_error)
    }

    async fn get(&self, owner: &UserId, id: RecipeId) -> Result<Recipe, Error> {
        let found = self
            .repo
            .find(owner, id)
            .await
            .map_err(map_recipe_error)?;
        owned_or_not_found(found, RESOURCE, id)
    }
}

#[async_trait]
impl<R: RecipeRepository> RecipesCommand for RecipeService<R> {
    async fn create(&self, owner: &UserId, mut draft: RecipeDraft) -> Result<Recipe, Error> {
        draft.tags = unique_names(&draft.tags);
        draft.ingredients = unique_names(&draft.ingredients);

        let recipe = self
            .repo
            .create(owner, &draft)
            .await
            .map_err(map_recipe_error)?;
        info!(recipe_id = %recipe.id(), user_id = %owner, "created recipe");
        Ok(recipe)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        mut changes: RecipeChanges,
        mode: UpdateMode,
    ) -> Result<Recipe, Error> {
        changes.check_mode(mode).map_err(missing_field)?;
        changes.tags = changes.tags.as_deref().map(unique_names);
        changes.ingredients = changes.ingredients.as_deref().map(unique_names);

        let updated = self
            .repo
            .update(owner, id, &changes)
            .await
            .map_err(map_recipe_error)?;
        owned_or_not_found(updated, RESOURCE, id)
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<(), Error> {
        let deleted = self
            .repo
            .delete(owner, id)
            .await
            .map_err(map_recipe_error)?;
        deleted_or_not_found(deleted, RESOURCE, id)?;
        info!(recipe_id = %id, user_id = %owner, "deleted recipe");
        Ok(())
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
