//! Delayed executor for daoforge DAOs.
//!
//! Call batches are queued under a deterministic operation hash and become
//! executable only after the configured delay. The delay can never be set
//! below a hard security floor, so every governance action has a guaranteed
//! reaction window.

pub mod error;
pub mod operation;
pub mod timelock;

pub use error::TimelockError;
pub use operation::{OperationState, QueuedOperation};
pub use timelock::{Timelock, TimelockEvent, MIN_DELAY_FLOOR_SECS};
