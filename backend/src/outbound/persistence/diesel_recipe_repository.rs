//! PostgreSQL-backed recipe repository.
//!
//! Creates and updates run in one transaction together with the get-or-create
//! of their tags and ingredients, so a failed write leaves no stray rows.

use std::collections::HashMap;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    AttributeKind, AttributeName, Price, Recipe, RecipeAttribute, RecipeChanges, RecipeDraft,
    RecipeFields, RecipeFilter, RecipeId, RecipeLink, RecipeTitle, TimeMinutes, UserId,
};

use super::attribute_queries::{attribute_from_row, load_linked, replace_links, resolve_names};
use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{LinkedAttributeRow, NewRecipeRow, RecipeRow, RecipeUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{recipe_ingredients, recipe_tags, recipes};

/// Diesel implementation of [`RecipeRepository`].
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> RecipeRepositoryError {
    map_pool_error(error, RecipeRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_diesel_error(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

/// Recipe row plus its linked tag and ingredient rows.
struct LoadedRecipe {
    row: RecipeRow,
    tags: Vec<LinkedAttributeRow>,
    ingredients: Vec<LinkedAttributeRow>,
}

fn fields_from_row(row: &RecipeRow) -> Result<RecipeFields, String> {
    let invalid = |err: &dyn std::fmt::Display| format!("invalid stored recipe {}: {err}", row.id);
    Ok(RecipeFields {
        title: RecipeTitle::new(row.title.clone()).map_err(|err| invalid(&err))?,
        time_minutes: TimeMinutes::new(i64::from(row.time_minutes))
            .map_err(|err| invalid(&err))?,
        price: Price::new(row.price.clone()).map_err(|err| invalid(&err))?,
        description: row.description.clone(),
        link: row
            .link
            .clone()
            .map(RecipeLink::new)
            .transpose()
            .map_err(|err| invalid(&err))?,
    })
}

fn attributes_from_rows(
    kind: AttributeKind,
    rows: Vec<LinkedAttributeRow>,
) -> Result<Vec<RecipeAttribute>, String> {
    rows.into_iter()
        .map(|(_, id, user_id, name)| attribute_from_row(kind, (id, user_id, name)))
        .collect()
}

fn into_recipe(loaded: LoadedRecipe) -> Result<Recipe, RecipeRepositoryError> {
    let LoadedRecipe {
        row,
        tags,
        ingredients,
    } = loaded;
    let fields = fields_from_row(&row).map_err(RecipeRepositoryError::query)?;
    let tags =
        attributes_from_rows(AttributeKind::Tag, tags).map_err(RecipeRepositoryError::query)?;
    let ingredients = attributes_from_rows(AttributeKind::Ingredient, ingredients)
        .map_err(RecipeRepositoryError::query)?;
    Ok(Recipe::new(
        RecipeId::new(row.id),
        UserId::from_uuid(row.user_id),
        fields,
        tags,
        ingredients,
    ))
}

fn group_by_recipe(rows: Vec<LinkedAttributeRow>) -> HashMap<i64, Vec<LinkedAttributeRow>> {
    let mut grouped: HashMap<i64, Vec<LinkedAttributeRow>> = HashMap::new();
    for row in rows {
        grouped.entry(row.0).or_default().push(row);
    }
    grouped
}

/// Attach tags and ingredients to already loaded recipe rows, keeping order.
async fn load_links(
    conn: &mut AsyncPgConnection,
    rows: Vec<RecipeRow>,
) -> QueryResult<Vec<LoadedRecipe>> {
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let mut tags = group_by_recipe(load_linked(conn, AttributeKind::Tag, ids.clone()).await?);
    let mut ingredients =
        group_by_recipe(load_linked(conn, AttributeKind::Ingredient, ids).await?);

    Ok(rows
        .into_iter()
        .map(|row| LoadedRecipe {
            tags: tags.remove(&row.id).unwrap_or_default(),
            ingredients: ingredients.remove(&row.id).unwrap_or_default(),
            row,
        })
        .collect())
}

/// Resolve names and relink them, inside the caller's transaction.
async fn relink(
    conn: &mut AsyncPgConnection,
    owner: Uuid,
    kind: AttributeKind,
    recipe_id: i64,
    names: &[AttributeName],
) -> QueryResult<()> {
    let ids = resolve_names(conn, owner, kind, names).await?;
    replace_links(conn, kind, recipe_id, &ids).await
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list(
        &self,
        owner: &UserId,
        filter: &RecipeFilter,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = recipes::table
            .filter(recipes::user_id.eq(*owner.as_uuid()))
            .select(RecipeRow::as_select())
            .order_by(recipes::id.desc())
            .into_boxed();
        if !filter.tag_ids.is_empty() {
            let tag_ids: Vec<i64> = filter.tag_ids.iter().map(|id| id.get()).collect();
            query = query.filter(
                recipes::id.eq_any(
                    recipe_tags::table
                        .filter(recipe_tags::tag_id.eq_any(tag_ids))
                        .select(recipe_tags::recipe_id),
                ),
            );
        }
        if !filter.ingredient_ids.is_empty() {
            let ingredient_ids: Vec<i64> =
                filter.ingredient_ids.iter().map(|id| id.get()).collect();
            query = query.filter(
                recipes::id.eq_any(
                    recipe_ingredients::table
                        .filter(recipe_ingredients::ingredient_id.eq_any(ingredient_ids))
                        .select(recipe_ingredients::recipe_id),
                ),
            );
        }

        let rows: Vec<RecipeRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        let loaded = load_links(&mut conn, rows).await.map_err(diesel_error)?;
        loaded.into_iter().map(into_recipe).collect()
    }

    async fn find(
        &self,
        owner: &UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::id.eq(id.get()))
            .filter(recipes::user_id.eq(*owner.as_uuid()))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut loaded = load_links(&mut conn, vec![row]).await.map_err(diesel_error)?;
        loaded.pop().map(into_recipe).transpose()
    }

    async fn create(
        &self,
        owner: &UserId,
        draft: &RecipeDraft,
    ) -> Result<Recipe, RecipeRepositoryError> {
        let owner_id = *owner.as_uuid();
        let fields = &draft.fields;
        let new_row = NewRecipeRow {
            user_id: owner_id,
            title: fields.title.as_ref(),
            time_minutes: fields.time_minutes.get(),
            price: fields.price.as_decimal(),
            description: fields.description.as_str(),
            link: fields.link.as_ref().map(AsRef::as_ref),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut loaded = conn
            .transaction(|conn| {
                async move {
                    let row: RecipeRow = diesel::insert_into(recipes::table)
                        .values(&new_row)
                        .returning(RecipeRow::as_returning())
                        .get_result(conn)
                        .await?;
                    relink(conn, owner_id, AttributeKind::Tag, row.id, &draft.tags).await?;
                    relink(
                        conn,
                        owner_id,
                        AttributeKind::Ingredient,
                        row.id,
                        &draft.ingredients,
                    )
                    .await?;
                    load_links(conn, vec![row]).await
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        let loaded = loaded
            .pop()
            .ok_or_else(|| RecipeRepositoryError::query("inserted recipe vanished"))?;
        into_recipe(loaded)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: RecipeId,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let owner_id = *owner.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let loaded = conn
            .transaction(|conn| {
                async move {
                    let current: Option<RecipeRow> = recipes::table
                        .filter(recipes::id.eq(id.get()))
                        .filter(recipes::user_id.eq(owner_id))
                        .select(RecipeRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(current) = current else {
                        return Ok(None);
                    };

                    let update = merge_changes(&current, changes);
                    let row: RecipeRow = diesel::update(recipes::table.find(current.id))
                        .set(&update)
                        .returning(RecipeRow::as_returning())
                        .get_result(conn)
                        .await?;
                    if let Some(names) = &changes.tags {
                        relink(conn, owner_id, AttributeKind::Tag, row.id, names).await?;
                    }
                    if let Some(names) = &changes.ingredients {
                        relink(conn, owner_id, AttributeKind::Ingredient, row.id, names).await?;
                    }
                    load_links(conn, vec![row]).await.map(|mut rows| rows.pop())
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        loaded.map(into_recipe).transpose()
    }

    async fn delete(&self, owner: &UserId, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(
            recipes::table
                .filter(recipes::id.eq(id.get()))
                .filter(recipes::user_id.eq(*owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}

/// Overlay requested scalar changes on the stored row.
fn merge_changes<'a>(current: &'a RecipeRow, changes: &'a RecipeChanges) -> RecipeUpdate<'a> {
    let price: &BigDecimal = changes
        .price
        .as_ref()
        .map_or(&current.price, Price::as_decimal);
    let link = match &changes.link {
        Some(link) => link.as_ref().map(AsRef::as_ref),
        None => current.link.as_deref(),
    };
    RecipeUpdate {
        title: changes
            .title
            .as_ref()
            .map_or(current.title.as_str(), |title| title.as_ref()),
        time_minutes: changes
            .time_minutes
            .map_or(current.time_minutes, TimeMinutes::get),
        price,
        description: changes
            .description
            .as_deref()
            .unwrap_or(current.description.as_str()),
        link,
    }
}
