//! Repair lifecycle domain service.
//!
//! Implements the driving ports for booking repairs, moving them through
//! their status lifecycle and reading them back. Tracking codes come from a
//! [`TrackingCodeGenerator`]; the repair store rejects taken codes and this
//! service asks for another, up to [`MAX_TRACKING_CODE_ATTEMPTS`] times.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    CreateRepairRequest, RepairCommand, RepairQuery, RepairRepository, RepairRepositoryError,
    TrackedRepair, TrackingCodeGenerator, UpdateRepairStatusRequest, UserRepository,
    UserRepositoryError,
};
use crate::domain::validation::{FieldViolation, ViolationCode, optional_text};
use crate::domain::{
    Error, INTAKE_NOTE, NewRepair, ProgressEntry, Repair, RepairId, RepairIntake, RepairStatus,
    SeedEntry, StatusChange, TrackingCode, UserId, default_status_note,
};

/// Number of tracking codes tried before creation gives up.
pub const MAX_TRACKING_CODE_ATTEMPTS: u32 = 5;

const ESTIMATED_TURNAROUND_DAYS: i64 = 2;
const STATUS_NOTES_MAX: usize = 2_000;

/// Repair lifecycle service implementing [`RepairCommand`] and
/// [`RepairQuery`].
#[derive(Clone)]
pub struct RepairLifecycleService<R, U> {
    repairs: Arc<R>,
    users: Arc<U>,
    codes: Arc<dyn TrackingCodeGenerator>,
    clock: Arc<dyn Clock>,
}

impl<R, U> RepairLifecycleService<R, U> {
    /// Create a new service over the given repositories.
    pub fn new(
        repairs: Arc<R>,
        users: Arc<U>,
        codes: Arc<dyn TrackingCodeGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repairs,
            users,
            codes,
            clock,
        }
    }
}

impl<R, U> RepairLifecycleService<R, U>
where
    R: RepairRepository,
    U: UserRepository,
{
    fn map_repair_error(error: RepairRepositoryError) -> Error {
        match error {
            RepairRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("repair repository unavailable: {message}"))
            }
            RepairRepositoryError::Query { message } => {
                Error::internal(format!("repair repository error: {message}"))
            }
            RepairRepositoryError::NotFound { id } => {
                Error::not_found(format!("repair {id} not found"))
            }
            RepairRepositoryError::StatusConflict {
                id,
                expected,
                actual,
            } => Error::conflict(format!("repair {id} changed status concurrently"))
                .with_details(json!({
                    "code": "status_conflict",
                    "expected": expected,
                    "actual": actual,
                })),
            RepairRepositoryError::DuplicateTrackingCode { code } => {
                Error::internal(format!("unexpected tracking code conflict: {code}"))
            }
        }
    }

    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            other => Error::internal(format!("user repository error: {other}")),
        }
    }

    fn repair_not_found(id: RepairId) -> Error {
        Error::not_found(format!("repair {id} not found"))
    }

    fn tracking_code_not_found(code: &str) -> Error {
        Error::not_found(format!("no repair with tracking code {code}"))
    }

    fn parse_status(raw: &str) -> Result<RepairStatus, Error> {
        raw.parse::<RepairStatus>().map_err(|err| {
            Error::from(
                FieldViolation::new("status", ViolationCode::InvalidStatus, err.to_string())
                    .with_value(err.value()),
            )
        })
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), Error> {
        let found = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?;
        if found.is_none() {
            return Err(Error::invalid_request(format!("user {user_id} does not exist"))
                .with_details(json!({
                    "field": "userId",
                    "code": "unknown_user",
                    "value": user_id.as_i64(),
                })));
        }
        Ok(())
    }

    async fn load_repair(&self, id: RepairId) -> Result<Repair, Error> {
        self.repairs
            .find_by_id(id)
            .await
            .map_err(Self::map_repair_error)?
            .ok_or_else(|| Self::repair_not_found(id))
    }

    async fn load_by_code(&self, raw: &str) -> Result<Repair, Error> {
        let Ok(code) = TrackingCode::parse(raw) else {
            return Err(Self::tracking_code_not_found(raw.trim()));
        };
        self.repairs
            .find_by_tracking_code(code.as_str())
            .await
            .map_err(Self::map_repair_error)?
            .ok_or_else(|| Self::tracking_code_not_found(code.as_str()))
    }

    async fn load_history(&self, id: RepairId) -> Result<Vec<ProgressEntry>, Error> {
        self.repairs
            .list_progress(id)
            .await
            .map_err(Self::map_repair_error)
    }
}

#[async_trait]
impl<R, U> RepairCommand for RepairLifecycleService<R, U>
where
    R: RepairRepository,
    U: UserRepository,
{
    async fn create_repair(&self, request: CreateRepairRequest) -> Result<Repair, Error> {
        let intake = RepairIntake::new(request.intake)?;
        if let Some(user_id) = request.user_id {
            self.ensure_user_exists(user_id).await?;
        }

        let received_at = self.clock.utc();
        let estimated_completion = received_at + TimeDelta::days(ESTIMATED_TURNAROUND_DAYS);

        for attempt in 1..=MAX_TRACKING_CODE_ATTEMPTS {
            let tracking_code = self.codes.generate();
            let new_repair = NewRepair {
                intake: intake.clone(),
                user_id: request.user_id,
                tracking_code,
                estimated_completion: Some(estimated_completion),
                received_at,
            };
            let seed = SeedEntry {
                notes: INTAKE_NOTE.to_owned(),
                timestamp: received_at,
            };
            match self.repairs.create_with_seed(new_repair, seed).await {
                Ok(repair) => {
                    info!(
                        repair_id = %repair.id(),
                        tracking_code = %repair.tracking_code(),
                        attempt,
                        "repair booked"
                    );
                    return Ok(repair);
                }
                Err(RepairRepositoryError::DuplicateTrackingCode { code }) => {
                    warn!(%code, attempt, "tracking code already assigned; regenerating");
                }
                Err(err) => return Err(Self::map_repair_error(err)),
            }
        }

        warn!(
            attempts = MAX_TRACKING_CODE_ATTEMPTS,
            "tracking code space exhausted for this request"
        );
        Err(
            Error::conflict("could not allocate a unique tracking code").with_details(json!({
                "code": "tracking_code_exhausted",
                "attempts": MAX_TRACKING_CODE_ATTEMPTS,
            })),
        )
    }

    async fn update_status(&self, request: UpdateRepairStatusRequest) -> Result<Repair, Error> {
        let next = Self::parse_status(&request.status)?;
        let notes = optional_text("notes", request.notes.as_deref(), STATUS_NOTES_MAX)?;
        let current = self.load_repair(request.repair_id).await?;

        let previous = current.status();
        let next = previous.transition_to(next).map_err(|err| {
            Error::conflict(err.to_string()).with_details(json!({
                "code": "invalid_transition",
                "from": err.from.as_str(),
                "to": err.to.as_str(),
            }))
        })?;

        let change = StatusChange {
            repair_id: current.id(),
            expected: previous,
            next,
            notes: notes.unwrap_or_else(|| default_status_note(next)),
            at: self.clock.utc().max(current.updated_at()),
        };
        let updated = self
            .repairs
            .apply_status_change(change)
            .await
            .map_err(Self::map_repair_error)?;
        info!(
            repair_id = %updated.id(),
            from = previous.as_str(),
            to = next.as_str(),
            "repair status changed"
        );
        Ok(updated)
    }
}

#[async_trait]
impl<R, U> RepairQuery for RepairLifecycleService<R, U>
where
    R: RepairRepository,
    U: UserRepository,
{
    async fn get_repair(&self, id: RepairId) -> Result<Repair, Error> {
        self.load_repair(id).await
    }

    async fn get_by_tracking_code(&self, code: &str) -> Result<Repair, Error> {
        self.load_by_code(code).await
    }

    async fn get_history(&self, id: RepairId) -> Result<Vec<ProgressEntry>, Error> {
        let repair = self.load_repair(id).await?;
        self.load_history(repair.id()).await
    }

    async fn track(&self, code: &str) -> Result<TrackedRepair, Error> {
        let repair = self.load_by_code(code).await?;
        let progress = self.load_history(repair.id()).await?;
        Ok(TrackedRepair { repair, progress })
    }

    async fn list_repairs(&self, user_id: Option<UserId>) -> Result<Vec<Repair>, Error> {
        let result = match user_id {
            Some(user_id) => self.repairs.list_by_user(user_id).await,
            None => self.repairs.list().await,
        };
        result.map_err(Self::map_repair_error)
    }
}

#[cfg(test)]
#[path = "repair_lifecycle_service_tests.rs"]
mod tests;
