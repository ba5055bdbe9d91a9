//! PostgreSQL-backed tag and ingredient repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AttributeRepository, AttributeRepositoryError};
use crate::domain::{AttributeId, AttributeKind, AttributeName, RecipeAttribute, UserId};

use super::attribute_queries::{attribute_from_row, with_attribute_tables};
use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::AttributeRow;
use super::pool::{DbPool, PoolError};

/// Diesel implementation of [`AttributeRepository`] for both kinds.
#[derive(Clone)]
pub struct DieselAttributeRepository {
    pool: DbPool,
}

impl DieselAttributeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AttributeRepositoryError {
    map_pool_error(error, AttributeRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> AttributeRepositoryError {
    map_diesel_error(
        error,
        AttributeRepositoryError::query,
        AttributeRepositoryError::connection,
    )
}

fn convert(
    kind: AttributeKind,
    row: AttributeRow,
) -> Result<RecipeAttribute, AttributeRepositoryError> {
    attribute_from_row(kind, row).map_err(AttributeRepositoryError::query)
}

#[async_trait]
impl AttributeRepository for DieselAttributeRepository {
    async fn list(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        assigned_only: bool,
    ) -> Result<Vec<RecipeAttribute>, AttributeRepositoryError> {
        let owner_id = *owner.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<AttributeRow> = with_attribute_tables!(kind, |attrs, links, link_col| {
            let mut query = attrs::table
                .filter(attrs::user_id.eq(owner_id))
                .select((attrs::id, attrs::user_id, attrs::name))
                .order_by((attrs::name.asc(), attrs::id.asc()))
                .into_boxed();
            if assigned_only {
                query = query.filter(attrs::id.eq_any(links::table.select(link_col)));
            }
            query.load(&mut conn).await
        })
        .map_err(diesel_error)?;

        rows.into_iter().map(|row| convert(kind, row)).collect()
    }

    async fn find(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<Option<RecipeAttribute>, AttributeRepositoryError> {
        let owner_id = *owner.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<AttributeRow> = with_attribute_tables!(kind, |attrs, links, link_col| {
            attrs::table
                .filter(attrs::id.eq(id.get()))
                .filter(attrs::user_id.eq(owner_id))
                .select((attrs::id, attrs::user_id, attrs::name))
                .first(&mut conn)
                .await
                .optional()
        })
        .map_err(diesel_error)?;

        row.map(|row| convert(kind, row)).transpose()
    }

    async fn create(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        name: &AttributeName,
    ) -> Result<RecipeAttribute, AttributeRepositoryError> {
        let owner_id = *owner.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: AttributeRow = with_attribute_tables!(kind, |attrs, links, link_col| {
            diesel::insert_into(attrs::table)
                .values((attrs::user_id.eq(owner_id), attrs::name.eq(name.as_ref())))
                .returning((attrs::id, attrs::user_id, attrs::name))
                .get_result(&mut conn)
                .await
        })
        .map_err(diesel_error)?;

        convert(kind, row)
    }

    async fn rename(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
        name: &AttributeName,
    ) -> Result<Option<RecipeAttribute>, AttributeRepositoryError> {
        let owner_id = *owner.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<AttributeRow> = with_attribute_tables!(kind, |attrs, links, link_col| {
            diesel::update(
                attrs::table
                    .filter(attrs::id.eq(id.get()))
                    .filter(attrs::user_id.eq(owner_id)),
            )
            .set(attrs::name.eq(name.as_ref()))
            .returning((attrs::id, attrs::user_id, attrs::name))
            .get_result(&mut conn)
            .await
            .optional()
        })
        .map_err(diesel_error)?;

        row.map(|row| convert(kind, row)).transpose()
    }

    async fn delete(
        &self,
        owner: &UserId,
        kind: AttributeKind,
        id: AttributeId,
    ) -> Result<bool, AttributeRepositoryError> {
        let owner_id = *owner.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = with_attribute_tables!(kind, |attrs, links, link_col| {
            diesel::delete(
                attrs::table
                    .filter(attrs::id.eq(id.get()))
                    .filter(attrs::user_id.eq(owner_id)),
            )
            .execute(&mut conn)
            .await
        })
        .map_err(diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, AttributeRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, AttributeRepositoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn invalid_rows_map_to_query_error() {
        let err = convert(AttributeKind::Ingredient, (1, Uuid::new_v4(), " ".to_owned()))
            .expect_err("blank name");
        assert!(matches!(err, AttributeRepositoryError::Query { .. }));
    }
}
