//! Random tracking-code generator backed by the thread-local RNG.

use rand::thread_rng;

use crate::domain::TrackingCode;
use crate::domain::ports::TrackingCodeGenerator;

/// Draws codes uniformly from the tracking-code alphabet.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTrackingCodes;

impl TrackingCodeGenerator for RandomTrackingCodes {
    fn generate(&self) -> TrackingCode {
        TrackingCode::random(&mut thread_rng())
    }
}
