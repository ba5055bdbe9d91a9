//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types at the boundary.

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{recipes, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileUpdate<'a> {
    pub name: &'a str,
    pub password_hash: &'a str,
}

/// Row read from `recipes`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: BigDecimal,
    pub description: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub time_minutes: i32,
    pub price: &'a BigDecimal,
    pub description: &'a str,
    pub link: Option<&'a str>,
}

/// Full scalar changeset; `link` is written even when `None`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct RecipeUpdate<'a> {
    pub title: &'a str,
    pub time_minutes: i32,
    pub price: &'a BigDecimal,
    pub description: &'a str,
    pub link: Option<&'a str>,
}

/// Tag or ingredient row, selected as a plain tuple from either table.
pub(crate) type AttributeRow = (i64, Uuid, String);

/// Attribute row joined with the recipe it is linked to.
pub(crate) type LinkedAttributeRow = (i64, i64, Uuid, String);
