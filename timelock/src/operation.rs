use daoforge_types::{Call, OpHash, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle of a queued operation. States only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationState {
    Queued,
    Executed,
    Canceled,
}

/// A call batch waiting out its delay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedOperation {
    pub calls: Vec<Call>,
    /// An operation that must be executed before this one may run.
    pub predecessor: Option<OpHash>,
    pub salt: [u8; 32],
    /// Earliest timestamp at which the batch may execute.
    pub eta: Timestamp,
    pub state: OperationState,
    pub queued_at: Timestamp,
}

impl QueuedOperation {
    pub fn is_pending(&self) -> bool {
        self.state == OperationState::Queued
    }

    pub fn is_ready(&self, now: Timestamp) -> bool {
        self.state == OperationState::Queued && now >= self.eta
    }
}
