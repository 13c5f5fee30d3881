//! Shared validation helpers for inbound HTTP adapters.
//!
//! Actix rejects malformed bodies, path segments and query strings before a
//! handler runs. The handlers here route those rejections through the
//! domain error envelope so clients always receive `invalid_request` with
//! field details instead of the framework's plain-text defaults.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::web::{JsonConfig, PathConfig, QueryConfig};
use serde_json::json;

use crate::domain::{Error, RepairId, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MalformedBody,
    InvalidPath,
    InvalidQuery,
    InvalidIdentifier,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::InvalidPath => "invalid_path",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidIdentifier => "invalid_identifier",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn rejection(code: ErrorCode, message: impl Into<String>, reason: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "code": code.as_str(),
        "reason": reason,
    }))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejection(
        ErrorCode::MalformedBody,
        "request body is not valid JSON for this endpoint",
        err.to_string(),
    )
    .into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    rejection(
        ErrorCode::InvalidPath,
        "path parameter is malformed",
        err.to_string(),
    )
    .into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejection(
        ErrorCode::InvalidQuery,
        "query string is malformed",
        err.to_string(),
    )
    .into()
}

/// JSON extractor configuration mapping payload errors to `invalid_request`.
#[must_use]
pub fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(json_error)
}

/// Path extractor configuration mapping parse errors to `invalid_request`.
#[must_use]
pub fn path_config() -> PathConfig {
    PathConfig::default().error_handler(path_error)
}

/// Query extractor configuration mapping parse errors to `invalid_request`.
#[must_use]
pub fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(query_error)
}

pub(crate) fn invalid_identifier_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a positive integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidIdentifier.as_str(),
    }))
}

fn parse_positive_id(value: &str, field: FieldName) -> Result<i64, Error> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid_identifier_error(field, value))
}

/// Parse a repair id path segment.
pub(crate) fn parse_repair_id(value: &str) -> Result<RepairId, Error> {
    parse_positive_id(value, FieldName::new("id")).map(RepairId::new)
}

/// Parse a user id, either from a path segment or a query parameter.
pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_positive_id(value, field).map(UserId::new)
}

/// Parse a catalogue id path segment.
pub(crate) fn parse_catalogue_id(value: &str) -> Result<i64, Error> {
    parse_positive_id(value, FieldName::new("id"))
}
