//! Voting-power token for daoforge DAOs.
//!
//! Balances double as vote weight. Both fungible and non-fungible flavors are
//! supported behind one engine; checkpointed history fixes past balances and
//! past supply so later transfers never change a proposal's arithmetic.

pub mod checkpoint;
pub mod error;
pub mod token;

pub use checkpoint::{Checkpoint, CheckpointHistory};
pub use error::TokenError;
pub use token::{TokenEvent, VotingToken};
