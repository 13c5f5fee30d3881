//! Email address value object.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{FieldViolation, ViolationCode};

const MAX_EMAIL_LEN: usize = 254;

/// Syntactically plausible email address.
///
/// Only the shape is checked: a single `@`, a non-empty local part, and a
/// dotted domain without whitespace. Deliverability is not our concern.
///
/// # Examples
/// ```
/// use backend::domain::EmailAddress;
///
/// let email = EmailAddress::parse("customer", " Jane@Example.com ").expect("valid");
/// assert_eq!(email.as_str(), "Jane@Example.com");
/// assert!(EmailAddress::parse("customer", "jane.example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate `raw`, attributing failures to `field`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, FieldViolation> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(FieldViolation::missing(field));
        }
        if value.len() > MAX_EMAIL_LEN {
            return Err(FieldViolation::too_long(field, MAX_EMAIL_LEN));
        }
        if !is_plausible(value) {
            return Err(FieldViolation::new(
                field,
                ViolationCode::InvalidFormat,
                format!("{field} must be a valid email address"),
            )
            .with_value(value));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for uniqueness checks.
    #[must_use]
    pub fn normalised(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

fn is_plausible(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
