use daoforge_types::{Role, Timestamp};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimelockError {
    #[error("minimum delay of {min_delay_secs}s is below the {floor}s security floor")]
    DelayTooShortForSecurity { min_delay_secs: u64, floor: u64 },

    #[error("caller does not hold the {} role", .0.name())]
    NotAuthorized(Role),

    #[error("operation is already queued")]
    AlreadyQueued,

    #[error("unknown operation")]
    UnknownOperation,

    #[error("operation was already executed")]
    AlreadyExecuted,

    #[error("operation was canceled")]
    OperationCanceled,

    #[error("operation is not ready: executable at {}, now {}", .eta.as_secs(), .now.as_secs())]
    NotReady { eta: Timestamp, now: Timestamp },

    #[error("predecessor operation has not been executed")]
    PredecessorNotExecuted,

    #[error("call failed: {0}")]
    CallFailed(String),
}
