//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST handler, the payload schemas, the domain
//! error mirror schemas from [`crate::inbound::http::schemas`], and the
//! session cookie security scheme. Swagger UI serves it in debug builds.

use crate::domain::{AttributeKind, User};
use crate::inbound::http::attributes::AttributeRequest;
use crate::inbound::http::recipes_dto::{
    AttributeNameRequest, AttributeResponse, RecipeDetailResponse, RecipeRequest,
    RecipeSummaryResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, UpdateProfileBody};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe backend API",
        description = "Per-user recipes, tags and ingredients behind session authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::replace_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::attributes::list_attributes,
        crate::inbound::http::attributes::create_attribute,
        crate::inbound::http::attributes::get_attribute,
        crate::inbound::http::attributes::replace_attribute,
        crate::inbound::http::attributes::update_attribute,
        crate::inbound::http::attributes::delete_attribute,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        AttributeKind,
        RegisterRequest,
        LoginRequest,
        UpdateProfileBody,
        RecipeRequest,
        AttributeNameRequest,
        AttributeRequest,
        AttributeResponse,
        RecipeSummaryResponse,
        RecipeDetailResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Registration, login and profile"),
        (name = "recipes", description = "Recipes owned by the signed-in user"),
        (name = "attributes", description = "Tags and ingredients owned by the signed-in user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
