//! Clock adapters.

use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time in whole unix seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now().truncated_to_secs()
    }
}

/// A clock that only moves when told to.
///
/// Lets tests cross the grace period without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward (or backward, for negative `secs`).
    pub fn advance(&self, secs: i64) {
        let mut now = self.lock();
        *now = now.plus_secs(secs);
    }

    pub fn set(&self, at: Timestamp) {
        *self.lock() = at;
    }

    fn lock(&self) -> MutexGuard<'_, Timestamp> {
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.lock()
    }
}
