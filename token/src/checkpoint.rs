//! Append-only value checkpoints.
//!
//! Each mutation appends `(at, value)`; historical reads return the latest
//! checkpoint at or before the requested point. This is what makes vote
//! weight snapshots immune to later balance changes.

use daoforge_types::Timestamp;
use serde::{Deserialize, Serialize};

/// One recorded value at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub at: Timestamp,
    pub value: u128,
}

/// An append-only checkpoint list ordered by timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointHistory {
    entries: Vec<Checkpoint>,
}

impl CheckpointHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` at `at`. Entries stay nondecreasing in time: a write
    /// at or before the latest checkpoint's timestamp overwrites that
    /// checkpoint instead of appending behind it, so `value_at`'s reverse
    /// scan always walks a sorted list.
    pub fn push(&mut self, at: Timestamp, value: u128) {
        match self.entries.last_mut() {
            Some(last) if last.at >= at => last.value = value,
            _ => self.entries.push(Checkpoint { at, value }),
        }
    }

    /// The most recent value, or zero if nothing was ever recorded.
    pub fn latest(&self) -> u128 {
        self.entries.last().map(|c| c.value).unwrap_or(0)
    }

    /// The value as of `point`: the latest checkpoint with `at <= point`.
    pub fn value_at(&self, point: Timestamp) -> u128 {
        self.entries
            .iter()
            .rev()
            .find(|c| c.at <= point)
            .map(|c| c.value)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
