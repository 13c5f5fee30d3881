//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Only
//! compiled for tests or with the `test-support` feature.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::TrackingCode;
use crate::domain::ports::TrackingCodeGenerator;

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock by `delta`, which may be negative.
    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    /// Jump to an absolute instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Generator that hands out scripted codes, then repeats the last one.
pub struct ScriptedTrackingCodes {
    queue: Mutex<VecDeque<TrackingCode>>,
    last: TrackingCode,
}

impl ScriptedTrackingCodes {
    /// Script the codes to return, in order.
    ///
    /// # Panics
    /// Panics when `codes` is empty or contains an invalid code.
    #[must_use]
    pub fn new(codes: &[&str]) -> Self {
        let parsed: VecDeque<TrackingCode> = codes
            .iter()
            .map(|raw| match TrackingCode::parse(raw) {
                Ok(code) => code,
                Err(err) => panic!("scripted tracking code {raw} is invalid: {err}"),
            })
            .collect();
        let Some(last) = parsed.back().cloned() else {
            panic!("scripted tracking codes must not be empty");
        };
        Self {
            queue: Mutex::new(parsed),
            last,
        }
    }
}

impl TrackingCodeGenerator for ScriptedTrackingCodes {
    fn generate(&self) -> TrackingCode {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| self.last.clone())
    }
}
