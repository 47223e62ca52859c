//! Clock adapters.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
///
/// Stores unix milliseconds so it can be shared behind an `Arc` and moved
/// from tests without locking.
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn at(time: Timestamp) -> Self {
        Self {
            millis: AtomicI64::new(time.as_unix_millis()),
        }
    }

    pub fn set(&self, time: Timestamp) {
        self.millis.store(time.as_unix_millis(), Ordering::SeqCst);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.millis.fetch_add(minutes * 60_000, Ordering::SeqCst);
    }

    pub fn advance_hours(&self, hours: i64) {
        self.advance_minutes(hours * 60);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        let millis = self.millis.load(Ordering::SeqCst);
        Timestamp::from_unix_millis(millis).unwrap_or_else(Timestamp::now)
    }
}
