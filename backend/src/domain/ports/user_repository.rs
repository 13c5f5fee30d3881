//! Port for customer account persistence.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } =>
            "username {username} is already taken",
        /// The email address is already registered.
        DuplicateEmail { email: String } =>
            "email {email} is already registered",
    }
}

/// Port for reading and creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Find an account by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Insert an account. Username and email are unique; email comparison
    /// ignores ASCII case.
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError>;
}
