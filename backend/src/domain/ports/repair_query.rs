//! Driving port for repair reads.

use async_trait::async_trait;

use crate::domain::{Error, ProgressEntry, Repair, RepairId, UserId};

/// A repair together with its ordered history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRepair {
    pub repair: Repair,
    pub progress: Vec<ProgressEntry>,
}

/// Domain use-case port for reading repairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepairQuery: Send + Sync {
    /// Fetch a repair by id.
    async fn get_repair(&self, id: RepairId) -> Result<Repair, Error>;

    /// Fetch a repair by tracking code.
    async fn get_by_tracking_code(&self, code: &str) -> Result<Repair, Error>;

    /// History of a repair, oldest first.
    async fn get_history(&self, id: RepairId) -> Result<Vec<ProgressEntry>, Error>;

    /// Repair and history for a tracking code.
    async fn track(&self, code: &str) -> Result<TrackedRepair, Error>;

    /// All repairs, or only those owned by `user_id`.
    async fn list_repairs(&self, user_id: Option<UserId>) -> Result<Vec<Repair>, Error>;
}
