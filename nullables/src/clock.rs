//! Nullable clock — controllable time for testing.

use daoforge_types::Timestamp;
use std::cell::Cell;

/// A clock whose current time is set by the test, not the system.
pub struct NullClock {
    now: Cell<u64>,
}

impl NullClock {
    pub fn new(start_secs: u64) -> Self {
        Self {
            now: Cell::new(start_secs),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.now.get())
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.now.set(self.now.get().saturating_add(secs));
    }

    pub fn set(&self, secs: u64) {
        self.now.set(secs);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}
