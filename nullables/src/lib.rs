//! Nullable infrastructure for testing.
//!
//! Real backends talk to disk and the system clock; the nullables hold
//! everything in memory and let tests control time explicitly.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullStore;
