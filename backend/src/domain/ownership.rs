//! Owner scoping shared by every per-kind service.
//!
//! Repositories filter by owner, so "not in scope" arrives here as `None` or
//! `false`. Both a foreign-owned and a missing record map to the same
//! `not_found` error so callers cannot probe for other users' ids.

use std::fmt::Display;

use serde_json::json;

use super::Error;

/// Unwrap a scoped lookup or report the resource as missing.
pub(crate) fn owned_or_not_found<T>(
    found: Option<T>,
    resource: &str,
    id: impl Display,
) -> Result<T, Error> {
    found.ok_or_else(|| not_found(resource, id))
}

/// Turn a scoped delete flag into a result.
pub(crate) fn deleted_or_not_found(
    deleted: bool,
    resource: &str,
    id: impl Display,
) -> Result<(), Error> {
    if deleted {
        Ok(())
    } else {
        Err(not_found(resource, id))
    }
}

fn not_found(resource: &str, id: impl Display) -> Error {
    let id = id.to_string();
    Error::not_found(format!("{resource} {id} not found"))
        .with_details(json!({ "resource": resource, "id": id }))
}
