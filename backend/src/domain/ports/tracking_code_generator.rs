//! Port producing candidate tracking codes.

use crate::domain::TrackingCode;

/// Source of candidate tracking codes.
///
/// Uniqueness is not promised here: the repair store rejects a taken code
/// and the lifecycle service asks for another.
#[cfg_attr(test, mockall::automock)]
pub trait TrackingCodeGenerator: Send + Sync {
    /// Produce a candidate code. Must not have side effects.
    fn generate(&self) -> TrackingCode;
}
