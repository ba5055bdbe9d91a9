//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod attributes;
pub mod error;
pub mod health;
pub mod recipes;
pub mod recipes_dto;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// The attribute routes match `/{tags|ingredients}` and are registered last
/// so they never shadow fixed paths.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use recipe_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(users::register)
        .service(users::login)
        .service(users::current_user)
        .service(users::update_current_user)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::get_recipe)
        .service(recipes::replace_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe)
        .service(attributes::list_attributes)
        .service(attributes::create_attribute)
        .service(attributes::get_attribute)
        .service(attributes::replace_attribute)
        .service(attributes::update_attribute)
        .service(attributes::delete_attribute);
}
