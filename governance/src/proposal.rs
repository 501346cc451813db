//! Proposal records and lifecycle states.

use daoforge_types::{Address, Call, OpHash, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A voter's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteSupport {
    Against,
    For,
    Abstain,
}

/// Accumulated weighted votes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub for_votes: u128,
    pub against_votes: u128,
    pub abstain_votes: u128,
}

/// Where a proposal is in its lifecycle, derived from the record and the
/// current time rather than stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    /// Created; voting has not started yet.
    Pending,
    /// The voting window is open.
    Active,
    /// Voting ended with `for > against` and quorum reached.
    Succeeded,
    /// Voting ended short of approval or quorum.
    Defeated,
    /// Waiting out its delay in the delayed executor.
    Queued,
    Executed,
    Canceled,
}

impl ProposalState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Succeeded => "succeeded",
            Self::Defeated => "defeated",
            Self::Queued => "queued",
            Self::Executed => "executed",
            Self::Canceled => "canceled",
        }
    }
}

/// One proposal. The tally and voter set mutate during the voting window;
/// everything else is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: Address,
    pub calls: Vec<Call>,
    pub description_uri: String,
    pub created_at: Timestamp,
    /// Point at which vote weight and supply are read. Equals `created_at`.
    pub snapshot: Timestamp,
    pub vote_start: Timestamp,
    pub vote_end: Timestamp,
    /// Total token supply at the snapshot, fixed for quorum math.
    pub supply_at_snapshot: u128,
    pub tally: Tally,
    /// Everyone who has voted. One vote per address, ever.
    pub voters: BTreeSet<Address>,
    /// Set once the proposal is queued into the delayed executor.
    pub operation: Option<OpHash>,
    pub executed: bool,
    pub canceled: bool,
}

impl Proposal {
    /// Resolve the lifecycle state at `now` against the given quorum.
    pub fn state(&self, quorum: u128, now: Timestamp) -> ProposalState {
        if self.canceled {
            return ProposalState::Canceled;
        }
        if self.executed {
            return ProposalState::Executed;
        }
        if self.operation.is_some() {
            return ProposalState::Queued;
        }
        if now < self.vote_start {
            return ProposalState::Pending;
        }
        if now < self.vote_end {
            return ProposalState::Active;
        }
        if self.tally.for_votes > self.tally.against_votes && self.tally.for_votes >= quorum {
            ProposalState::Succeeded
        } else {
            ProposalState::Defeated
        }
    }
}
