//! PostgreSQL-backed `ContactMessageRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContactMessageRepository, ContactMessageRepositoryError};
use crate::domain::{ContactMessage, ContactSubmission};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewContactMessageRow;
use super::pool::{DbPool, PoolError};
use super::schema::contact_messages;

/// Diesel-backed implementation of the contact message repository port.
#[derive(Clone)]
pub struct DieselContactMessageRepository {
    pool: DbPool,
}

impl DieselContactMessageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactMessageRepositoryError {
    map_basic_pool_error(error, ContactMessageRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ContactMessageRepositoryError {
    map_basic_diesel_error(
        error,
        ContactMessageRepositoryError::query,
        ContactMessageRepositoryError::connection,
    )
}

#[async_trait]
impl ContactMessageRepository for DieselContactMessageRepository {
    async fn create(
        &self,
        submission: ContactSubmission,
        received_at: DateTime<Utc>,
    ) -> Result<ContactMessage, ContactMessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = diesel::insert_into(contact_messages::table)
            .values(&NewContactMessageRow {
                name: &submission.name,
                email: submission.email.as_str(),
                subject: &submission.subject,
                message: &submission.message,
                created_at: received_at,
            })
            .returning(contact_messages::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ContactMessage::from_submission(id, submission, received_at))
    }
}
