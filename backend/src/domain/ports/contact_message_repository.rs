//! Port for storing contact-form messages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ContactMessage, ContactSubmission};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact message repository adapters.
    pub enum ContactMessageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact message repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "contact message repository query failed: {message}",
    }
}

/// Write-only port for contact messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    /// Store a message received at `received_at`.
    async fn create(
        &self,
        submission: ContactSubmission,
        received_at: DateTime<Utc>,
    ) -> Result<ContactMessage, ContactMessageRepositoryError>;
}
