//! Driving port for tag and ingredient reads.

use async_trait::async_trait;

use crate::domain::{AttributeId, AttributeKind, Error, RecipeAttribute, UserId};

/// Query port over the acting identity's tags and ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeAttributesQuery: Send + Sync {
    /// Owned attributes ordered by name then id.
    async fn list(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        assigned_only: bool,
    ) -> Result<Vec<RecipeAttribute>, Error>;

    async fn get(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<RecipeAttribute, Error>;
}
