//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by PostgreSQL via Diesel, with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel rows and domain types. Ownership scoping is expressed as a
//!   `user_id` filter on every statement.
//! - **Internal models**: Row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Pool and Diesel failures are mapped onto the
//!   port error of each repository.
//!
//! # Example
//!
//! ```ignore
//! use recipe_backend::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! ```

mod attribute_queries;
pub(crate) mod diesel_helpers;
mod diesel_attribute_repository;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_attribute_repository::DieselAttributeRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
