//! Rendering of domain [`Error`]s as HTTP responses.
//!
//! Extractor failures (unparseable JSON bodies, bad query strings) are routed
//! through the same `invalid_request` payload as handler validation, so every
//! client error has one JSON shape.

use std::fmt::Display;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by every handler.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        if self.code() != ErrorCode::InternalError {
            return response.json(self);
        }

        error!(message = self.message(), trace_id = ?self.trace_id(), "request failed");
        let public = Error::internal(REDACTED_MESSAGE);
        response.json(match self.trace_id() {
            Some(id) => public.with_trace_id(id),
            None => public,
        })
    }
}

fn malformed(part: &'static str, cause: impl Display) -> actix_web::Error {
    warn!(part, %cause, "rejected malformed request");
    Error::invalid_request(format!("malformed request {part}: {cause}"))
        .with_details(json!({ "field": part, "code": "invalid_value" }))
        .into()
}

/// JSON extractor settings for the `/api/v1` scope.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _: &HttpRequest| malformed("body", err))
}

/// Query extractor settings for the `/api/v1` scope.
pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _: &HttpRequest| malformed("query", err))
}
