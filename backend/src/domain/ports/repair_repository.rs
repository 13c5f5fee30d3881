//! Port for repair and progress-history persistence.

use async_trait::async_trait;

use crate::domain::{
    NewRepair, ProgressEntry, Repair, RepairId, RepairStatus, SeedEntry, StatusChange, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by repair repository adapters.
    pub enum RepairRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "repair repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "repair repository query failed: {message}",
        /// Another repair already holds the tracking code.
        DuplicateTrackingCode { code: String } =>
            "tracking code {code} is already assigned",
        /// The repair targeted by a status change does not exist.
        NotFound { id: i64 } =>
            "repair {id} not found",
        /// The repair left the expected status before the change applied.
        StatusConflict { id: i64, expected: String, actual: String } =>
            "repair {id} is {actual}, expected {expected}",
    }
}

/// Port for reading and mutating repairs.
///
/// Mutations are atomic: a repair never becomes visible without its seed
/// entry, and a status change and its progress entry land together.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepairRepository: Send + Sync {
    /// Find a repair by id.
    async fn find_by_id(&self, id: RepairId) -> Result<Option<Repair>, RepairRepositoryError>;

    /// Find a repair by its exact tracking code.
    async fn find_by_tracking_code(
        &self,
        code: &str,
    ) -> Result<Option<Repair>, RepairRepositoryError>;

    /// All repairs ordered by id.
    async fn list(&self) -> Result<Vec<Repair>, RepairRepositoryError>;

    /// Repairs owned by `user_id`, ordered by id.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Repair>, RepairRepositoryError>;

    /// Insert a repair together with its first progress entry.
    ///
    /// Fails with [`RepairRepositoryError::DuplicateTrackingCode`] and writes
    /// nothing when the code is taken.
    async fn create_with_seed(
        &self,
        repair: NewRepair,
        seed: SeedEntry,
    ) -> Result<Repair, RepairRepositoryError>;

    /// Apply `change` if the repair is still in `change.expected`, appending
    /// the matching progress entry.
    async fn apply_status_change(
        &self,
        change: StatusChange,
    ) -> Result<Repair, RepairRepositoryError>;

    /// Progress entries for a repair in `(timestamp, id)` order.
    async fn list_progress(
        &self,
        repair_id: RepairId,
    ) -> Result<Vec<ProgressEntry>, RepairRepositoryError>;
}

impl RepairRepositoryError {
    /// Build a [`RepairRepositoryError::StatusConflict`] from typed statuses.
    pub fn status_mismatch(id: RepairId, expected: RepairStatus, actual: RepairStatus) -> Self {
        Self::status_conflict(id.as_i64(), expected.as_str(), actual.as_str())
    }
}
