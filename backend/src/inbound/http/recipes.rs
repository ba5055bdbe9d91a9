//! Recipe HTTP handlers.
//!
//! ```text
//! GET /api/v1/recipes?tags=1,2&ingredients=3
//! POST /api/v1/recipes
//! GET /api/v1/recipes/{id}
//! PUT /api/v1/recipes/{id}
//! PATCH /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Every route is scoped to the session user; recipes owned by anyone else
//! answer `404`.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{AttributeId, RecipeFilter, RecipeId, UpdateMode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes_dto::{
    RecipeDetailResponse, RecipeRequest, RecipeSummaryResponse,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_id_list;

/// Filters accepted by `GET /api/v1/recipes`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeListQuery {
    /// Comma-separated tag ids; a recipe matches when it carries any of them.
    #[param(example = "1,2")]
    pub tags: Option<String>,
    /// Comma-separated ingredient ids; a recipe matches when it uses any of them.
    #[param(example = "3")]
    pub ingredients: Option<String>,
}

fn attribute_ids(raw: Option<&str>, field: &str) -> ApiResult<Vec<AttributeId>> {
    let ids = parse_id_list(raw, field)?;
    Ok(ids.into_iter().map(AttributeId::new).collect())
}

impl RecipeListQuery {
    fn into_filter(self) -> ApiResult<RecipeFilter> {
        Ok(RecipeFilter {
            tag_ids: attribute_ids(self.tags.as_deref(), "tags")?,
            ingredient_ids: attribute_ids(self.ingredients.as_deref(), "ingredients")?,
        })
    }
}

/// List the caller's recipes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "Owned recipes", body = [RecipeSummaryResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RecipeListQuery>,
) -> ApiResult<web::Json<Vec<RecipeSummaryResponse>>> {
    let owner = session.require_user_id()?;
    let filter = query.into_inner().into_filter()?;
    let recipes = state.recipes_query.list(&owner, filter).await?;
    Ok(web::Json(
        recipes.iter().map(RecipeSummaryResponse::from).collect(),
    ))
}

/// Create a recipe owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Created recipe", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let recipe = state.recipes.create(&owner, draft).await?;
    Ok(HttpResponse::Created().json(RecipeDetailResponse::from(&recipe)))
}

/// Fetch one of the caller's recipes with its description.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = RecipeDetailResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    let owner = session.require_user_id()?;
    let id = RecipeId::new(path.into_inner());
    let recipe = state.recipes_query.get(&owner, id).await?;
    Ok(web::Json(RecipeDetailResponse::from(&recipe)))
}

async fn apply_update(
    state: &HttpState,
    session: &SessionContext,
    id: i64,
    payload: RecipeRequest,
    mode: UpdateMode,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    let owner = session.require_user_id()?;
    let changes = payload.into_changes()?;
    let recipe = state
        .recipes
        .update(&owner, RecipeId::new(id), changes, mode)
        .await?;
    Ok(web::Json(RecipeDetailResponse::from(&recipe)))
}

/// Replace a recipe. Title, time and price are required.
///
/// Omitting `tags` or `ingredients` keeps the current associations.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "replaceRecipe"
)]
#[put("/recipes/{id}")]
pub async fn replace_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    apply_update(
        &state,
        &session,
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Full,
    )
    .await
}

/// Change only the supplied fields of a recipe.
#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDetailResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[patch("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeDetailResponse>> {
    apply_update(
        &state,
        &session,
        path.into_inner(),
        payload.into_inner(),
        UpdateMode::Partial,
    )
    .await
}

/// Delete a recipe. Its tags and ingredients survive.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    state
        .recipes
        .delete(&owner, RecipeId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
