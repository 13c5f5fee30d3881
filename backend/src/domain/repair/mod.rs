//! Repair bookings and their lifecycle.
//!
//! A repair is created from a customer's intake form, receives a public
//! [`TrackingCode`], and then moves through [`RepairStatus`] values. Every
//! status it passes through is recorded as a [`ProgressEntry`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EmailAddress;
use super::UserId;
use super::validation::{FieldViolation, optional_text, required_text};

mod progress;
mod status;
#[cfg(test)]
mod tests;
mod tracking_code;

pub use progress::{INTAKE_NOTE, ProgressEntry, default_status_note, order_history};
pub use status::{IllegalTransition, ParseRepairStatusError, RepairStatus};
pub use tracking_code::{
    TRACKING_CODE_ALPHABET, TRACKING_CODE_PREFIX, TRACKING_CODE_SUFFIX_LEN, TrackingCode,
    TrackingCodeError,
};

const DEVICE_TYPE_MAX: usize = 50;
const DEVICE_MODEL_MAX: usize = 100;
const ISSUE_DESCRIPTION_MAX: usize = 2_000;
const CUSTOMER_NAME_MAX: usize = 100;
const CUSTOMER_PHONE_MAX: usize = 32;

/// Store-assigned repair identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepairId(i64);

impl RepairId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RepairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated intake form as submitted by a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairIntakeDraft {
    pub device_type: String,
    pub device_model: String,
    pub issue_description: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
}

/// Validated intake form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairIntake {
    device_type: String,
    device_model: String,
    issue_description: String,
    customer_name: String,
    customer_email: EmailAddress,
    customer_phone: Option<String>,
}

impl RepairIntake {
    /// Validate a draft. Text fields are trimmed; the first failing field is
    /// reported.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{RepairIntake, RepairIntakeDraft};
    ///
    /// let intake = RepairIntake::new(RepairIntakeDraft {
    ///     device_type: "smartphone".into(),
    ///     device_model: "iPhone 13".into(),
    ///     issue_description: "cracked screen".into(),
    ///     customer_name: "Jane Doe".into(),
    ///     customer_email: "jane@x.com".into(),
    ///     customer_phone: None,
    /// })
    /// .expect("valid intake");
    /// assert_eq!(intake.device_model(), "iPhone 13");
    /// ```
    pub fn new(draft: RepairIntakeDraft) -> Result<Self, FieldViolation> {
        Ok(Self {
            device_type: required_text("deviceType", &draft.device_type, DEVICE_TYPE_MAX)?,
            device_model: required_text("deviceModel", &draft.device_model, DEVICE_MODEL_MAX)?,
            issue_description: required_text(
                "issueDescription",
                &draft.issue_description,
                ISSUE_DESCRIPTION_MAX,
            )?,
            customer_name: required_text("customerName", &draft.customer_name, CUSTOMER_NAME_MAX)?,
            customer_email: EmailAddress::parse("customerEmail", &draft.customer_email)?,
            customer_phone: optional_text(
                "customerPhone",
                draft.customer_phone.as_deref(),
                CUSTOMER_PHONE_MAX,
            )?,
        })
    }

    #[must_use]
    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    #[must_use]
    pub fn device_model(&self) -> &str {
        &self.device_model
    }

    #[must_use]
    pub fn issue_description(&self) -> &str {
        &self.issue_description
    }

    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub fn customer_email(&self) -> &EmailAddress {
        &self.customer_email
    }

    #[must_use]
    pub fn customer_phone(&self) -> Option<&str> {
        self.customer_phone.as_deref()
    }
}

/// Everything a store needs to insert a repair in the `received` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepair {
    pub intake: RepairIntake,
    pub user_id: Option<UserId>,
    pub tracking_code: TrackingCode,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub received_at: DateTime<Utc>,
}

/// The first progress entry, written in the same unit as the repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedEntry {
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

/// A status change to be applied only if the repair is still in `expected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub repair_id: RepairId,
    pub expected: RepairStatus,
    pub next: RepairStatus,
    pub notes: String,
    pub at: DateTime<Utc>,
}

/// Raw field set used to rebuild a [`Repair`] from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairDraft {
    pub id: RepairId,
    pub user_id: Option<UserId>,
    pub tracking_code: TrackingCode,
    pub device_type: String,
    pub device_model: String,
    pub issue_description: String,
    pub status: RepairStatus,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub technician_notes: String,
    pub technician_id: String,
}

/// Errors raised when a stored record violates repair invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepairValidationError {
    #[error("repair {id} was updated before it was created")]
    UpdatedBeforeCreated { id: RepairId },
}

/// A repair booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    id: RepairId,
    user_id: Option<UserId>,
    tracking_code: TrackingCode,
    device_type: String,
    device_model: String,
    issue_description: String,
    status: RepairStatus,
    estimated_completion: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    technician_notes: String,
    technician_id: String,
}

impl Repair {
    /// Rebuild a repair, checking `updated_at >= created_at`.
    pub fn new(draft: RepairDraft) -> Result<Self, RepairValidationError> {
        if draft.updated_at < draft.created_at {
            return Err(RepairValidationError::UpdatedBeforeCreated { id: draft.id });
        }
        Ok(Self {
            id: draft.id,
            user_id: draft.user_id,
            tracking_code: draft.tracking_code,
            device_type: draft.device_type,
            device_model: draft.device_model,
            issue_description: draft.issue_description,
            status: draft.status,
            estimated_completion: draft.estimated_completion,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
            customer_name: draft.customer_name,
            customer_email: draft.customer_email,
            customer_phone: draft.customer_phone,
            technician_notes: draft.technician_notes,
            technician_id: draft.technician_id,
        })
    }

    /// Materialise a freshly inserted repair.
    #[must_use]
    pub fn received(id: RepairId, new: NewRepair) -> Self {
        let NewRepair {
            intake,
            user_id,
            tracking_code,
            estimated_completion,
            received_at,
        } = new;
        Self {
            id,
            user_id,
            tracking_code,
            device_type: intake.device_type,
            device_model: intake.device_model,
            issue_description: intake.issue_description,
            status: RepairStatus::Received,
            estimated_completion,
            created_at: received_at,
            updated_at: received_at,
            customer_name: intake.customer_name,
            customer_email: intake.customer_email.as_str().to_owned(),
            customer_phone: intake.customer_phone,
            technician_notes: String::new(),
            technician_id: String::new(),
        }
    }

    /// Copy of this repair in `status`, touched at `at`.
    ///
    /// `updated_at` never moves backwards: an earlier `at` is clamped.
    #[must_use]
    pub fn with_status(mut self, status: RepairStatus, at: DateTime<Utc>) -> Self {
        self.status = status;
        self.updated_at = self.updated_at.max(at);
        self
    }

    #[must_use]
    pub const fn id(&self) -> RepairId {
        self.id
    }

    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    #[must_use]
    pub const fn tracking_code(&self) -> &TrackingCode {
        &self.tracking_code
    }

    #[must_use]
    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    #[must_use]
    pub fn device_model(&self) -> &str {
        &self.device_model
    }

    #[must_use]
    pub fn issue_description(&self) -> &str {
        &self.issue_description
    }

    #[must_use]
    pub const fn status(&self) -> RepairStatus {
        self.status
    }

    #[must_use]
    pub const fn estimated_completion(&self) -> Option<DateTime<Utc>> {
        self.estimated_completion
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    #[must_use]
    pub fn customer_phone(&self) -> Option<&str> {
        self.customer_phone.as_deref()
    }

    #[must_use]
    pub fn technician_notes(&self) -> &str {
        &self.technician_notes
    }

    #[must_use]
    pub fn technician_id(&self) -> &str {
        &self.technician_id
    }
}
