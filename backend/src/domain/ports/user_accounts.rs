//! Driving port for customer accounts.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationDraft, User, UserId};

/// Domain use-case port for registering and reading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Register a new account.
    async fn register(&self, draft: RegistrationDraft) -> Result<User, Error>;

    /// Fetch an account by id.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
