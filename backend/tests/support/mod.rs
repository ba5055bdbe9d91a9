//! Shared helpers for the repository integration suites.
//!
//! Each file under `backend/tests/` is its own crate and pulls this module in
//! with `mod support;`, using only the helpers it needs.
#![allow(dead_code, reason = "each test crate uses a subset of the helpers")]

pub mod database;
pub mod embedded_postgres;
pub mod pg_embed;

pub use database::{TestDatabase, test_database};
pub use embedded_postgres::provision_template_database;
