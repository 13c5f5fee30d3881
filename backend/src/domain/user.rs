//! Customer accounts.
//!
//! Accounts exist so repairs can be linked to a returning customer. There is
//! no login flow; the password is kept only as a salted digest.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::EmailAddress;
use super::validation::{FieldViolation, ViolationCode, optional_text, required_text};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;
const FULL_NAME_MAX: usize = 100;
const PHONE_MAX: usize = 32;
const SALT_BYTES: usize = 16;

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login handle: 3 to 32 ASCII letters, digits, `_`, `-` or `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate a username.
    pub fn parse(raw: &str) -> Result<Self, FieldViolation> {
        let value = required_text("username", raw, USERNAME_MAX)?;
        if value.chars().count() < USERNAME_MIN {
            return Err(FieldViolation::too_short("username", USERNAME_MIN));
        }
        if !value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'))
        {
            return Err(FieldViolation::new(
                "username",
                ViolationCode::InvalidFormat,
                "username may only contain letters, digits, '_', '-' or '.'",
            )
            .with_value(value));
        }
        Ok(Self(value))
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Salted SHA-256 password digest in `salt$digest` hex form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` under a fresh random salt.
    pub fn generate<R: Rng + ?Sized>(password: &str, rng: &mut R) -> Self {
        let mut salt = [0_u8; SALT_BYTES];
        rng.fill(&mut salt);
        Self::with_salt(password, &hex::encode(salt))
    }

    fn with_salt(password: &str, salt: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        Self(format!("{salt}${}", hex::encode(hasher.finalize())))
    }

    /// Rehydrate a stored digest without re-hashing.
    #[must_use]
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Check `password` against the digest.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        self.0
            .split_once('$')
            .is_some_and(|(salt, _)| Self::with_salt(password, salt) == *self)
    }

    /// Stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Unvalidated sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Validated sign-up form. The clear-text password is kept only until it is
/// hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: String,
    full_name: String,
    email: EmailAddress,
    phone: Option<String>,
}

impl Registration {
    /// Validate a sign-up form.
    pub fn new(draft: RegistrationDraft) -> Result<Self, FieldViolation> {
        let username = Username::parse(&draft.username)?;
        let password_len = draft.password.chars().count();
        if password_len < PASSWORD_MIN {
            return Err(FieldViolation::too_short("password", PASSWORD_MIN));
        }
        if password_len > PASSWORD_MAX {
            return Err(FieldViolation::too_long("password", PASSWORD_MAX));
        }
        Ok(Self {
            username,
            password: draft.password,
            full_name: required_text("fullName", &draft.full_name, FULL_NAME_MAX)?,
            email: EmailAddress::parse("email", &draft.email)?,
            phone: optional_text("phone", draft.phone.as_deref(), PHONE_MAX)?,
        })
    }

    /// Consume the form, hashing the password.
    pub fn into_new_user<R: Rng + ?Sized>(self, rng: &mut R, created_at: DateTime<Utc>) -> NewUser {
        NewUser {
            password_hash: PasswordHash::generate(&self.password, rng),
            username: self.username,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            created_at,
        }
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Account ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub full_name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stored customer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    full_name: String,
    email: EmailAddress,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl User {
    /// Materialise an inserted account.
    #[must_use]
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            username: new.username,
            password_hash: new.password_hash,
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            created_at: new.created_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> RegistrationDraft {
        RegistrationDraft {
            username: "jdoe".to_owned(),
            password: "correct horse".to_owned(),
            full_name: "Jane Doe".to_owned(),
            email: "jane@x.com".to_owned(),
            phone: None,
        }
    }

    #[rstest]
    fn password_hash_verifies_only_original_password() {
        let mut rng = SmallRng::seed_from_u64(1);
        let hash = PasswordHash::generate("hunter22", &mut rng);
        assert!(hash.verify("hunter22"));
        assert!(!hash.verify("hunter23"));
        assert!(!hash.as_str().contains("hunter22"));
    }

    #[rstest]
    fn same_password_gets_different_salts() {
        let mut rng = SmallRng::seed_from_u64(1);
        let first = PasswordHash::generate("hunter22", &mut rng);
        let second = PasswordHash::generate("hunter22", &mut rng);
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_stored_hash_never_verifies() {
        assert!(!PasswordHash::from_stored("nodollar").verify("nodollar"));
    }

    #[rstest]
    #[case("ab", ViolationCode::TooShort)]
    #[case("jane doe", ViolationCode::InvalidFormat)]
    #[case("", ViolationCode::MissingField)]
    fn username_rules(#[case] raw: &str, #[case] code: ViolationCode) {
        assert_eq!(Username::parse(raw).expect_err("must reject").code(), code);
    }

    #[rstest]
    fn registration_rejects_short_password(mut draft: RegistrationDraft) {
        draft.password = "short".to_owned();
        let err = Registration::new(draft).expect_err("must reject");
        assert_eq!(err.field(), "password");
    }

    #[rstest]
    fn debug_output_hides_password(draft: RegistrationDraft) {
        let registration = Registration::new(draft).expect("valid");
        assert!(!format!("{registration:?}").contains("correct horse"));
    }

    #[rstest]
    fn into_new_user_hashes_password(draft: RegistrationDraft) {
        let mut rng = SmallRng::seed_from_u64(9);
        let new_user = Registration::new(draft)
            .expect("valid")
            .into_new_user(&mut rng, Utc::now());
        assert!(new_user.password_hash.verify("correct horse"));
    }
}
