//! Driving port for contact-form submissions.

use async_trait::async_trait;

use crate::domain::{ContactDraft, ContactMessage, Error};

/// Domain use-case port for accepting contact messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactCommand: Send + Sync {
    /// Validate and store a message.
    async fn submit(&self, draft: ContactDraft) -> Result<ContactMessage, Error>;
}
