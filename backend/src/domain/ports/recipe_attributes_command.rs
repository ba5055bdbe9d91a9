//! Driving port for tag and ingredient mutations.

use async_trait::async_trait;

use crate::domain::{
    AttributeId, AttributeKind, AttributeName, Error, RecipeAttribute, UpdateMode, UserId,
};

/// Command port for owned tags and ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeAttributesCommand: Send + Sync {
    async fn create(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        name: AttributeName,
    ) -> Result<RecipeAttribute, Error>;

    /// Rename an attribute. A full update requires `name`; a partial update
    /// without it returns the attribute unchanged.
    async fn update(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
        name: Option<AttributeName>,
        mode: UpdateMode,
    ) -> Result<RecipeAttribute, Error>;

    /// Delete an attribute. Recipes that used it keep existing.
    async fn delete(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<(), Error>;
}
