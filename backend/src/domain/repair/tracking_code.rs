//! Public tracking codes handed to customers.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Prefix shared by every tracking code.
pub const TRACKING_CODE_PREFIX: &str = "REP";
/// Number of random symbols following the prefix.
pub const TRACKING_CODE_SUFFIX_LEN: usize = 8;
/// Symbols drawn for the suffix. `0`, `O`, `1` and `I` are left out so codes
/// survive being read over the phone.
pub const TRACKING_CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Reasons a string is not a tracking code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TrackingCodeError {
    #[error("tracking code must start with REP")]
    MissingPrefix,
    #[error("tracking code must have 8 characters after the prefix")]
    WrongLength,
    #[error("tracking code contains a character outside the allowed alphabet")]
    InvalidSymbol,
}

/// Customer-facing repair identifier such as `REPK7M2Q9XA`.
///
/// # Examples
/// ```
/// use backend::domain::TrackingCode;
///
/// let code = TrackingCode::parse(" repk7m2q9xa ").expect("valid");
/// assert_eq!(code.as_str(), "REPK7M2Q9XA");
/// assert!(TrackingCode::parse("REP0000000O").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingCode(String);

impl TrackingCode {
    /// Normalise user input (trim, upper-case) and validate it.
    pub fn parse(raw: &str) -> Result<Self, TrackingCodeError> {
        let candidate = raw.trim().to_ascii_uppercase();
        let suffix = candidate
            .strip_prefix(TRACKING_CODE_PREFIX)
            .ok_or(TrackingCodeError::MissingPrefix)?;
        if suffix.len() != TRACKING_CODE_SUFFIX_LEN {
            return Err(TrackingCodeError::WrongLength);
        }
        if !suffix.bytes().all(|b| TRACKING_CODE_ALPHABET.contains(&b)) {
            return Err(TrackingCodeError::InvalidSymbol);
        }
        Ok(Self(candidate))
    }

    /// Draw a fresh code from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut code = String::with_capacity(TRACKING_CODE_PREFIX.len() + TRACKING_CODE_SUFFIX_LEN);
        code.push_str(TRACKING_CODE_PREFIX);
        code.extend(
            (0..TRACKING_CODE_SUFFIX_LEN)
                .filter_map(|_| TRACKING_CODE_ALPHABET.choose(rng))
                .map(|symbol| char::from(*symbol)),
        );
        Self(code)
    }

    /// Borrow the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TrackingCode {
    type Error = TrackingCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TrackingCode> for String {
    fn from(value: TrackingCode) -> Self {
        value.0
    }
}

impl AsRef<str> for TrackingCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn random_codes_round_trip_through_parse() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let code = TrackingCode::random(&mut rng);
            assert_eq!(TrackingCode::parse(code.as_str()), Ok(code.clone()));
            assert_eq!(code.as_str().len(), 11);
        }
    }

    #[rstest]
    fn random_codes_are_sparse() {
        let mut rng = SmallRng::seed_from_u64(42);
        let codes: HashSet<_> = (0..1_000)
            .map(|_| TrackingCode::random(&mut rng))
            .collect();
        assert_eq!(codes.len(), 1_000);
    }

    #[rstest]
    #[case("", TrackingCodeError::MissingPrefix)]
    #[case("FF-2024-0001", TrackingCodeError::MissingPrefix)]
    #[case("REPABC", TrackingCodeError::WrongLength)]
    #[case("REPABCDEFGHJK", TrackingCodeError::WrongLength)]
    #[case("REPABCDEFG0", TrackingCodeError::InvalidSymbol)]
    #[case("REPABCDEFGI", TrackingCodeError::InvalidSymbol)]
    fn parse_rejects(#[case] raw: &str, #[case] expected: TrackingCodeError) {
        assert_eq!(TrackingCode::parse(raw), Err(expected));
    }

    #[rstest]
    fn parse_normalises_case_and_whitespace() {
        let code = TrackingCode::parse("\trepabcdefgh\n").expect("valid");
        assert_eq!(code.to_string(), "REPABCDEFGH");
    }
}
