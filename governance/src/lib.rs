//! Proposal engine for daoforge DAOs.
//!
//! Drives the proposal lifecycle from creation through voting to delayed
//! execution. Vote weight is read from the voting token at the proposal's
//! snapshot point, so transfers after creation never change an outcome;
//! execution goes through the delayed executor, never directly.

pub mod engine;
pub mod error;
pub mod minting;
pub mod params;
pub mod proposal;

pub use engine::{GovernanceEvent, ProposalEngine};
pub use error::GovernanceError;
pub use minting::{mint_voting_power, MAX_VOTING_POWER};
pub use params::GovernorParams;
pub use proposal::{Proposal, ProposalState, Tally, VoteSupport};
