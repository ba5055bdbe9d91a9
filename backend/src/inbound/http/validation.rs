//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected payload becomes `invalid_request` with a `details` object
//! naming the offending `field` and a stable machine-readable `code`.

use std::fmt::Display;

use serde_json::json;

use crate::domain::{
    AttributeValidationError, Error, PasswordValidationError, RecipeValidationError,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidId,
    EmptyValue,
    TooLong,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidValue => "invalid_value",
            Self::InvalidId => "invalid_id",
            Self::EmptyValue => "empty_value",
            Self::TooLong => "too_long",
            Self::OutOfRange => "out_of_range",
        }
    }
}

pub(crate) fn field_error(field: &str, code: ErrorCode, message: impl Display) -> Error {
    Error::invalid_request(message.to_string()).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format_args!("{field} is required"),
    )
}

pub(crate) fn recipe_error(err: RecipeValidationError) -> Error {
    use RecipeValidationError as E;
    let (field, code) = match &err {
        E::EmptyTitle => ("title", ErrorCode::EmptyValue),
        E::TitleTooLong { .. } => ("title", ErrorCode::TooLong),
        E::NegativeTime | E::TimeTooLarge { .. } => ("timeMinutes", ErrorCode::OutOfRange),
        E::PriceNotNumeric | E::PriceTooPrecise { .. } => ("price", ErrorCode::InvalidValue),
        E::NegativePrice | E::PriceTooLarge { .. } => ("price", ErrorCode::OutOfRange),
        E::LinkTooLong { .. } => ("link", ErrorCode::TooLong),
        E::MissingField { field } => return missing_field_error(field),
    };
    field_error(field, code, err)
}

pub(crate) fn attribute_error(field: &str, err: AttributeValidationError) -> Error {
    let code = match err {
        AttributeValidationError::EmptyName => ErrorCode::EmptyValue,
        AttributeValidationError::NameTooLong { .. } => ErrorCode::TooLong,
    };
    field_error(field, code, err)
}

pub(crate) fn user_error(err: UserValidationError) -> Error {
    use UserValidationError as E;
    let (field, code) = match err {
        E::EmptyId | E::InvalidId => ("id", ErrorCode::InvalidId),
        E::EmptyEmail => ("email", ErrorCode::EmptyValue),
        E::InvalidEmail => ("email", ErrorCode::InvalidValue),
        E::EmailTooLong { .. } => ("email", ErrorCode::TooLong),
        E::NameTooLong { .. } => ("name", ErrorCode::TooLong),
    };
    field_error(field, code, err)
}

pub(crate) fn password_error(err: PasswordValidationError) -> Error {
    let code = match err {
        PasswordValidationError::Empty => ErrorCode::EmptyValue,
    };
    field_error("password", code, err)
}

/// Parse a comma-separated list of numeric ids such as `1,2,3`.
///
/// Blank input yields an empty list; blank entries are skipped.
pub(crate) fn parse_id_list(raw: Option<&str>, field: &str) -> Result<Vec<i64>, Error> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(index, part)| {
            part.parse::<i64>().map_err(|_| {
                Error::invalid_request(format!("{field} must be a comma-separated list of ids"))
                    .with_details(json!({
                        "field": field,
                        "index": index,
                        "value": part,
                        "code": ErrorCode::InvalidId.as_str(),
                    }))
            })
        })
        .collect()
}
