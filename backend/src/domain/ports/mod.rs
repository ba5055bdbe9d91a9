//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`, [`LoginService`]) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod attribute_repository;
mod login_service;
mod recipe_attributes_command;
mod recipe_attributes_query;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use attribute_repository::MockAttributeRepository;
pub use attribute_repository::{AttributeRepository, AttributeRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use recipe_attributes_command::MockRecipeAttributesCommand;
pub use recipe_attributes_command::RecipeAttributesCommand;
#[cfg(test)]
pub use recipe_attributes_query::MockRecipeAttributesQuery;
pub use recipe_attributes_query::RecipeAttributesQuery;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use recipes_command::MockRecipesCommand;
pub use recipes_command::RecipesCommand;
#[cfg(test)]
pub use recipes_query::MockRecipesQuery;
pub use recipes_query::RecipesQuery;
#[cfg(test)]
pub use user_accounts::{MockUserAccountsCommand, MockUserProfileQuery};
pub use user_accounts::{
    RegisterUserRequest, UpdateProfileRequest, UserAccountsCommand, UserProfileQuery,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
