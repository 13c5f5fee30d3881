//! Driving port for repair mutations.

use async_trait::async_trait;

use crate::domain::{Error, Repair, RepairId, RepairIntakeDraft, UserId};

/// Request to book a new repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepairRequest {
    pub intake: RepairIntakeDraft,
    pub user_id: Option<UserId>,
}

/// Request to move a repair to another status.
///
/// `status` is the raw wire value; the service parses it so unknown values
/// are rejected before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRepairStatusRequest {
    pub repair_id: RepairId,
    pub status: String,
    pub notes: Option<String>,
}

/// Domain use-case port for booking repairs and changing their status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepairCommand: Send + Sync {
    /// Book a repair in the `received` state with a fresh tracking code.
    async fn create_repair(&self, request: CreateRepairRequest) -> Result<Repair, Error>;

    /// Move a repair along its lifecycle, appending a progress entry.
    async fn update_status(&self, request: UpdateRepairStatusRequest) -> Result<Repair, Error>;
}
