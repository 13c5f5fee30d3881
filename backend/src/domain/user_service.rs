//! Customer account service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{UserAccounts, UserRepository, UserRepositoryError};
use crate::domain::{Error, Registration, RegistrationDraft, User, UserId};

/// Account service implementing [`UserAccounts`].
#[derive(Clone)]
pub struct UserService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> UserService<U> {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::DuplicateUsername { username } => {
                Error::conflict(format!("username {username} is already taken")).with_details(
                    json!({"field": "username", "code": "duplicate", "value": username}),
                )
            }
            UserRepositoryError::DuplicateEmail { email } => {
                Error::conflict("email is already registered")
                    .with_details(json!({"field": "email", "code": "duplicate", "value": email}))
            }
        }
    }
}

#[async_trait]
impl<U> UserAccounts for UserService<U>
where
    U: UserRepository,
{
    async fn register(&self, draft: RegistrationDraft) -> Result<User, Error> {
        let registration = Registration::new(draft)?;
        let new_user = registration.into_new_user(&mut rand::thread_rng(), self.clock.utc());
        let user = self
            .users
            .create(new_user)
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %user.id(), username = %user.username(), "account registered");
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}
