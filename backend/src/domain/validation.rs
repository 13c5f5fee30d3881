//! Field-level validation shared by the domain constructors.
//!
//! Violations carry the wire name of the offending field so that adapters
//! can point clients at the exact input that failed.

use std::fmt;

use serde_json::json;

use super::Error;

/// Machine-readable reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationCode {
    MissingField,
    TooLong,
    TooShort,
    InvalidFormat,
    InvalidStatus,
}

impl ViolationCode {
    /// Stable snake_case form used in error details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TooLong => "too_long",
            Self::TooShort => "too_short",
            Self::InvalidFormat => "invalid_format",
            Self::InvalidStatus => "invalid_status",
        }
    }
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    field: &'static str,
    code: ViolationCode,
    message: String,
    value: Option<String>,
}

impl FieldViolation {
    /// Construct a violation for `field`.
    pub fn new(field: &'static str, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
            value: None,
        }
    }

    /// Echo the rejected value back in the error details.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Wire name of the field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Reason code.
    #[must_use]
    pub const fn code(&self) -> ViolationCode {
        self.code
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn missing(field: &'static str) -> Self {
        Self::new(
            field,
            ViolationCode::MissingField,
            format!("{field} must not be empty"),
        )
    }

    pub(crate) fn too_long(field: &'static str, max: usize) -> Self {
        Self::new(
            field,
            ViolationCode::TooLong,
            format!("{field} must be at most {max} characters"),
        )
    }

    pub(crate) fn too_short(field: &'static str, min: usize) -> Self {
        Self::new(
            field,
            ViolationCode::TooShort,
            format!("{field} must be at least {min} characters"),
        )
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FieldViolation {}

impl From<FieldViolation> for Error {
    fn from(violation: FieldViolation) -> Self {
        let details = match &violation.value {
            Some(value) => json!({
                "field": violation.field,
                "code": violation.code.as_str(),
                "value": value,
            }),
            None => json!({
                "field": violation.field,
                "code": violation.code.as_str(),
            }),
        };
        Self::invalid_request(violation.message).with_details(details)
    }
}

/// Trim `value` and require it to be non-empty and at most `max` characters.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, FieldViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::missing(field));
    }
    if trimmed.chars().count() > max {
        return Err(FieldViolation::too_long(field, max));
    }
    Ok(trimmed.to_owned())
}

/// Like [`required_text`], but blank input collapses to `None`.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, FieldViolation> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => required_text(field, text, max).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("  hello ", "hello")]
    #[case("x", "x")]
    fn required_text_trims(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(required_text("name", input, 10).expect("valid"), expected);
    }

    #[rstest]
    #[case("", ViolationCode::MissingField)]
    #[case("   ", ViolationCode::MissingField)]
    #[case("abcdefghijk", ViolationCode::TooLong)]
    fn required_text_rejects(#[case] input: &str, #[case] code: ViolationCode) {
        let err = required_text("name", input, 10).expect_err("must reject");
        assert_eq!(err.code(), code);
        assert_eq!(err.field(), "name");
    }

    #[rstest]
    fn optional_text_collapses_blank_to_none() {
        assert_eq!(optional_text("phone", Some("  "), 5).expect("valid"), None);
        assert_eq!(optional_text("phone", None, 5).expect("valid"), None);
    }

    #[rstest]
    fn violation_converts_to_invalid_request_with_details() {
        let error: Error = FieldViolation::missing("deviceType").into();
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({"field": "deviceType", "code": "missing_field"}))
        );
    }

    #[rstest]
    fn violation_value_is_echoed() {
        let error: Error = FieldViolation::new("status", ViolationCode::InvalidStatus, "bad status")
            .with_value("nope")
            .into();
        assert_eq!(
            error.details(),
            Some(&json!({"field": "status", "code": "invalid_status", "value": "nope"}))
        );
    }
}
