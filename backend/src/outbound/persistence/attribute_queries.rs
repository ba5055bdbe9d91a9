//! Queries shared by the tag and ingredient tables.
//!
//! `tags`/`recipe_tags` and `ingredients`/`recipe_ingredients` have identical
//! shapes but distinct Diesel types, so [`with_attribute_tables`] expands a
//! query body once per kind with module aliases bound to the right tables.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::{AttributeId, AttributeKind, AttributeName, RecipeAttribute, UserId};

use super::models::{AttributeRow, LinkedAttributeRow};

/// Expand `$body` with `$attrs`, `$links` and `$link_col` bound to the tables
/// of `$kind`.
macro_rules! with_attribute_tables {
    ($kind:expr, |$attrs:ident, $links:ident, $link_col:ident| $body:block) => {
        match $kind {
            $crate::domain::AttributeKind::Tag => {
                #[allow(unused_imports, reason = "not every query touches every table")]
                use $crate::outbound::persistence::schema::recipe_tags as $links;
                #[allow(unused_imports, reason = "not every query touches every table")]
                use $crate::outbound::persistence::schema::recipe_tags::tag_id as $link_col;
                #[allow(unused_imports, reason = "not every query touches every table")]
                use $crate::outbound::persistence::schema::tags as $attrs;
                $body
            }
            $crate::domain::AttributeKind::Ingredient => {
                #[allow(unused_imports, reason = "not every query touches every table")]
                use $crate::outbound::persistence::schema::ingredients as $attrs;
                #[allow(unused_imports, reason = "not every query touches every table")]
                use $crate::outbound::persistence::schema::recipe_ingredients as $links;
                #[allow(unused_imports, reason = "not every query touches every table")]
                use $crate::outbound::persistence::schema::recipe_ingredients::ingredient_id as $link_col;
                $body
            }
        }
    };
}

pub(crate) use with_attribute_tables;

/// Convert a stored row into a domain attribute.
pub(crate) fn attribute_from_row(
    kind: AttributeKind,
    (id, user_id, name): AttributeRow,
) -> Result<RecipeAttribute, String> {
    let name = AttributeName::new(name)
        .map_err(|err| format!("invalid stored {} {id}: {err}", kind.label()))?;
    Ok(RecipeAttribute::new(
        AttributeId::new(id),
        UserId::from_uuid(user_id),
        kind,
        name,
    ))
}

/// Resolve names to attributes in `owner`'s namespace, creating missing ones.
///
/// An existing name reuses its lowest id. Call inside a transaction so the
/// lookup and insert are atomic with the surrounding recipe write.
pub(crate) async fn resolve_names(
    conn: &mut AsyncPgConnection,
    owner: Uuid,
    kind: AttributeKind,
    names: &[AttributeName],
) -> QueryResult<Vec<i64>> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let id: i64 = with_attribute_tables!(kind, |attrs, links, link_col| {
            let existing: Option<i64> = attrs::table
                .filter(attrs::user_id.eq(owner))
                .filter(attrs::name.eq(name.as_ref()))
                .order_by(attrs::id.asc())
                .select(attrs::id)
                .first(conn)
                .await
                .optional()?;
            match existing {
                Some(id) => id,
                None => {
                    diesel::insert_into(attrs::table)
                        .values((attrs::user_id.eq(owner), attrs::name.eq(name.as_ref())))
                        .returning(attrs::id)
                        .get_result(conn)
                        .await?
                }
            }
        });
        ids.push(id);
    }
    Ok(ids)
}

/// Replace every link between `recipe_id` and attributes of `kind`.
pub(crate) async fn replace_links(
    conn: &mut AsyncPgConnection,
    kind: AttributeKind,
    recipe_id: i64,
    attribute_ids: &[i64],
) -> QueryResult<()> {
    with_attribute_tables!(kind, |attrs, links, link_col| {
        diesel::delete(links::table.filter(links::recipe_id.eq(recipe_id)))
            .execute(conn)
            .await?;
        let rows: Vec<_> = attribute_ids
            .iter()
            .map(|id| (links::recipe_id.eq(recipe_id), link_col.eq(*id)))
            .collect();
        if !rows.is_empty() {
            diesel::insert_into(links::table)
                .values(rows)
                .on_conflict_do_nothing()
                .execute(conn)
                .await?;
        }
    });
    Ok(())
}

/// Attributes of `kind` linked to any of `recipe_ids`, ordered by name then id.
pub(crate) async fn load_linked(
    conn: &mut AsyncPgConnection,
    kind: AttributeKind,
    recipe_ids: Vec<i64>,
) -> QueryResult<Vec<LinkedAttributeRow>> {
    if recipe_ids.is_empty() {
        return Ok(Vec::new());
    }
    with_attribute_tables!(kind, |attrs, links, link_col| {
        links::table
            .inner_join(attrs::table)
            .filter(links::recipe_id.eq_any(recipe_ids))
            .select((links::recipe_id, attrs::id, attrs::user_id, attrs::name))
            .order_by((attrs::name.asc(), attrs::id.asc()))
            .load(conn)
            .await
    })
}
