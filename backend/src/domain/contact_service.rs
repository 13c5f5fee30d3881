//! Contact-form service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ContactCommand, ContactMessageRepository, ContactMessageRepositoryError,
};
use crate::domain::{ContactDraft, ContactMessage, ContactSubmission, Error};

/// Contact service implementing [`ContactCommand`].
#[derive(Clone)]
pub struct ContactService<R> {
    messages: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ContactService<R> {
    /// Create a new service over the given repository.
    pub fn new(messages: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { messages, clock }
    }
}

fn map_contact_error(error: ContactMessageRepositoryError) -> Error {
    match error {
        ContactMessageRepositoryError::Connection { message } => Error::service_unavailable(
            format!("contact message repository unavailable: {message}"),
        ),
        ContactMessageRepositoryError::Query { message } => {
            Error::internal(format!("contact message repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> ContactCommand for ContactService<R>
where
    R: ContactMessageRepository,
{
    async fn submit(&self, draft: ContactDraft) -> Result<ContactMessage, Error> {
        let submission = ContactSubmission::new(draft)?;
        let stored = self
            .messages
            .create(submission, self.clock.utc())
            .await
            .map_err(map_contact_error)?;
        info!(message_id = stored.id, "contact message received");
        Ok(stored)
    }
}
