//! Tag and ingredient HTTP handlers.
//!
//! ```text
//! GET /api/v1/{tags|ingredients}?assignedOnly=1
//! POST /api/v1/{tags|ingredients}
//! GET|PUT|PATCH|DELETE /api/v1/{tags|ingredients}/{id}
//! ```
//!
//! Both collections share one set of handlers keyed by [`AttributeKind`].

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AttributeId, AttributeKind, UpdateMode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes_dto::{AttributeResponse, attribute_name};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ErrorCode, field_error};

#[derive(Debug, Deserialize)]
struct CollectionPath {
    kind: AttributeKind,
}

#[derive(Debug, Deserialize)]
struct ItemPath {
    kind: AttributeKind,
    id: i64,
}

/// Create or rename payload for a tag or ingredient.
///
/// Example JSON: `{"name":"Vegan"}`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AttributeRequest {
    #[schema(example = "Vegan")]
    pub name: Option<String>,
}

/// Filters accepted by attribute listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct AttributeListQuery {
    /// `1` or `true` restricts the listing to names used by some recipe.
    #[serde(alias = "assigned_only")]
    #[param(example = "1")]
    pub assigned_only: Option<String>,
}

impl AttributeListQuery {
    fn assigned_only(&self) -> ApiResult<bool> {
        let Some(raw) = self.assigned_only.as_deref() else {
            return Ok(false);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" | "no" => Ok(false),
            "1" | "true" | "yes" => Ok(true),
            other => Err(field_error(
                "assignedOnly",
                ErrorCode::InvalidValue,
                format_args!("assignedOnly must be 0 or 1, got {other:?}"),
            )),
        }
    }
}

/// List the caller's tags or ingredients ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/{kind}",
    params(
        ("kind" = AttributeKind, Path, description = "`tags` or `ingredients`"),
        AttributeListQuery
    ),
    responses(
        (status = 200, description = "Owned attributes", body = [AttributeResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["attributes"],
    operation_id = "listAttributes"
)]
#[get("/{kind:tags|ingredients}")]
pub async fn list_attributes(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CollectionPath>,
    query: web::Query<AttributeListQuery>,
) -> ApiResult<web::Json<Vec<AttributeResponse>>> {
    let owner = session.require_user_id()?;
    let assigned_only = query.assigned_only()?;
    let attributes = state
        .attributes_query
        .list(&owner, path.kind, assigned_only)
        .await?;
    Ok(web::Json(
        attributes.iter().map(AttributeResponse::from).collect(),
    ))
}

/// Create a tag or ingredient in the caller's namespace.
#[utoipa::path(
    post,
    path = "/api/v1/{kind}",
    params(("kind" = AttributeKind, Path, description = "`tags` or `ingredients`")),
    request_body = AttributeRequest,
    responses(
        (status = 201, description = "Created attribute", body = AttributeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["attributes"],
    operation_id = "createAttribute"
)]
#[post("/{kind:tags|ingredients}")]
pub async fn create_attribute(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CollectionPath>,
    payload: web::Json<AttributeRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let name = attribute_name("name", payload.into_inner().name)?;
    let attribute = state.attributes.create(&owner, path.kind, name).await?;
    Ok(HttpResponse::Created().json(AttributeResponse::from(&attribute)))
}

/// Fetch one of the caller's tags or ingredients.
#[utoipa::path(
    get,
    path = "/api/v1/{kind}/{id}",
    params(
        ("kind" = AttributeKind, Path, description = "`tags` or `ingredients`"),
        ("id" = i64, Path, description = "Attribute identifier")
    ),
    responses(
        (status = 200, description = "Attribute", body = AttributeResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["attributes"],
    operation_id = "getAttribute"
)]
#[get("/{kind:tags|ingredients}/{id}")]
pub async fn get_attribute(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ItemPath>,
) -> ApiResult<web::Json<AttributeResponse>> {
    let owner = session.require_user_id()?;
    let attribute = state
        .attributes_query
        .get(&owner, path.kind, AttributeId::new(path.id))
        .await?;
    Ok(web::Json(AttributeResponse::from(&attribute)))
}

async fn apply_rename(
    state: &HttpState,
    session: &SessionContext,
    path: ItemPath,
    payload: AttributeRequest,
    mode: UpdateMode,
) -> ApiResult<web::Json<AttributeResponse>> {
    let owner = session.require_user_id()?;
    let name = payload
        .name
        .map(|raw| attribute_name("name", Some(raw)))
        .transpose()?;
    let attribute = state
        .attributes
        .update(&owner, path.kind, AttributeId::new(path.id), name, mode)
        .await?;
    Ok(web::Json(AttributeResponse::from(&attribute)))
}

/// Rename a tag or ingredient. `name` is required.
#[utoipa::path(
    put,
    path = "/api/v1/{kind}/{id}",
    params(
        ("kind" = AttributeKind, Path, description = "`tags` or `ingredients`"),
        ("id" = i64, Path, description = "Attribute identifier")
    ),
    request_body = AttributeRequest,
    responses(
        (status = 200, description = "Renamed attribute", body = AttributeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["attributes"],
    operation_id = "replaceAttribute"
)]
#[put("/{kind:tags|ingredients}/{id}")]
pub async fn replace_attribute(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ItemPath>,
    payload: web::Json<AttributeRequest>,
) -> ApiResult<web::Json<AttributeResponse>> {
    apply_rename(
        &state,
        &session,
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Full,
    )
    .await
}

/// Rename a tag or ingredient when `name` is supplied.
#[utoipa::path(
    patch,
    path = "/api/v1/{kind}/{id}",
    params(
        ("kind" = AttributeKind, Path, description = "`tags` or `ingredients`"),
        ("id" = i64, Path, description = "Attribute identifier")
    ),
    request_body = AttributeRequest,
    responses(
        (status = 200, description = "Attribute", body = AttributeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["attributes"],
    operation_id = "updateAttribute"
)]
#[patch("/{kind:tags|ingredients}/{id}")]
pub async fn update_attribute(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ItemPath>,
    payload: web::Json<AttributeRequest>,
) -> ApiResult<web::Json<AttributeResponse>> {
    apply_rename(
        &state,
        &session,
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Partial,
    )
    .await
}

/// Delete a tag or ingredient, detaching it from every recipe.
#[utoipa::path(
    delete,
    path = "/api/v1/{kind}/{id}",
    params(
        ("kind" = AttributeKind, Path, description = "`tags` or `ingredients`"),
        ("id" = i64, Path, description = "Attribute identifier")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["attributes"],
    operation_id = "deleteAttribute"
)]
#[delete("/{kind:tags|ingredients}/{id}")]
pub async fn delete_attribute(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ItemPath>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    state
        .attributes
        .delete(&owner, path.kind, AttributeId::new(path.id))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "attributes_tests.rs"]
mod tests;
