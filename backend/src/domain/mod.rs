//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, plus the services implementing the driving ports. Types validate
//! on construction so adapters cannot build invalid state.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserAccount, Email: identities and their credentials.
//! - Recipe and its value objects; RecipeAttribute for tags and ingredients.
//! - Services: UserAccountService, RecipeService, AttributeService.

pub mod attribute_service;
pub mod auth;
pub mod error;
mod ownership;
pub mod password;
pub mod ports;
pub mod recipe;
pub mod recipe_attribute;
pub mod recipe_service;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::attribute_service::AttributeService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::password::{
    HashedPassword, Password, PasswordHashError, PasswordValidationError,
};
pub use self::recipe::{
    PRICE_SCALE, Price, RECIPE_LINK_MAX, RECIPE_TITLE_MAX, Recipe, RecipeChanges, RecipeDraft,
    RecipeFields, RecipeFilter, RecipeId, RecipeLink, RecipeTitle, RecipeValidationError,
    TimeMinutes, UpdateMode,
};
pub use self::recipe_attribute::{
    ATTRIBUTE_NAME_MAX, AttributeId, AttributeKind, AttributeName, AttributeValidationError,
    RecipeAttribute, sort_attributes, unique_names,
};
pub use self::recipe_service::RecipeService;
pub use self::trace_id::TraceId;
pub use self::user::{
    AccountFlags, EMAIL_MAX, Email, USER_NAME_MAX, User, UserAccount, UserId, UserValidationError,
    validate_user_name,
};
pub use self::user_account_service::UserAccountService;

