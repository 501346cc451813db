//! DAO treasury.
//!
//! Holds native value and arbitrary assets. Anyone may deposit; only the
//! configured controller (the delayed executor or the proposal engine,
//! depending on DAO configuration) may withdraw.

pub mod error;
pub mod treasury;

pub use error::TreasuryError;
pub use treasury::{Treasury, TreasuryEvent};
