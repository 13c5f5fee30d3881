//! Repair status lifecycle.
//!
//! ```text
//! received ─┬─> diagnosed ─┬─> repairing <──> testing ─┬─> completed
//!           │              │                           │
//!           └──────────────┴── any non-terminal ───────┴─> cancelled
//! ```
//!
//! Forward skips are permitted; `testing -> repairing` is the only backward
//! edge. `completed` and `cancelled` are terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of states a repair can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(try_from = "String")]
pub enum RepairStatus {
    Received,
    Diagnosed,
    Repairing,
    Testing,
    Completed,
    Cancelled,
}

/// Error returned when a status string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown repair status: {value}")]
pub struct ParseRepairStatusError {
    value: String,
}

impl ParseRepairStatusError {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A status change the lifecycle forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move a repair from {from} to {to}")]
pub struct IllegalTransition {
    pub from: RepairStatus,
    pub to: RepairStatus,
}

impl RepairStatus {
    /// Every canonical status in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Received,
        Self::Diagnosed,
        Self::Repairing,
        Self::Testing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Canonical wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Diagnosed => "diagnosed",
            Self::Repairing => "repairing",
            Self::Testing => "testing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are accepted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// States reachable in one step from `self`.
    #[must_use]
    pub const fn successors(self) -> &'static [Self] {
        match self {
            Self::Received => &[
                Self::Diagnosed,
                Self::Repairing,
                Self::Testing,
                Self::Completed,
                Self::Cancelled,
            ],
            Self::Diagnosed => &[
                Self::Repairing,
                Self::Testing,
                Self::Completed,
                Self::Cancelled,
            ],
            Self::Repairing => &[Self::Testing, Self::Completed, Self::Cancelled],
            Self::Testing => &[Self::Repairing, Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.successors().contains(&next)
    }

    /// Validate a move from `self` to `next`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::RepairStatus;
    ///
    /// assert!(RepairStatus::Testing.transition_to(RepairStatus::Repairing).is_ok());
    /// assert!(RepairStatus::Completed.transition_to(RepairStatus::Repairing).is_err());
    /// ```
    pub fn transition_to(self, next: Self) -> Result<Self, IllegalTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(IllegalTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepairStatus {
    type Err = ParseRepairStatusError;

    /// Parse a canonical value or one of the legacy aliases
    /// (`in_progress`, `ready`). Matching is exact.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "received" => Ok(Self::Received),
            "diagnosed" => Ok(Self::Diagnosed),
            "repairing" | "in_progress" => Ok(Self::Repairing),
            "testing" => Ok(Self::Testing),
            "completed" | "ready" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseRepairStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for RepairStatus {
    type Error = ParseRepairStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
