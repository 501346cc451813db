use daoforge_timelock::TimelockError;
use daoforge_types::ProposalId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("quorum percentage {0} is out of range (must be 1..=99)")]
    InvalidQuorumPercentage(u8),

    #[error("voting period must be greater than zero")]
    ZeroVotingPeriod,

    #[error("proposal description must not be empty")]
    InvalidMetadata,

    #[error("the owning DAO is deleted")]
    Inactive,

    #[error("proposal must contain at least one call")]
    EmptyProposal,

    #[error("proposal {0} already exists")]
    AlreadyExists(ProposalId),

    #[error("unknown proposal {0}")]
    UnknownProposal(ProposalId),

    #[error("proposer weight {held} is below the threshold {required}")]
    BelowProposalThreshold { required: u128, held: u128 },

    #[error("proposers cannot vote on their own proposal")]
    SelfVoteForbidden,

    #[error("caller has already voted on this proposal")]
    AlreadyVoted,

    #[error("caller had no voting power at the proposal snapshot")]
    NoVotingPower,

    #[error("proposal is not open for voting")]
    VotingNotOpen,

    #[error("proposal has not succeeded")]
    ProposalNotSucceeded,

    #[error("proposal is not queued")]
    NotQueued,

    #[error("proposal was already executed")]
    AlreadyExecuted,

    #[error("proposal was already canceled")]
    AlreadyCanceled,

    #[error("only the proposer may cancel")]
    OnlyProposer,

    #[error("minting would reach the voting-power ceiling: resulting {resulting}, max {max}")]
    VotingPowerLimitExceeded { resulting: u128, max: u128 },

    #[error("mint failed: {0}")]
    MintFailed(String),

    #[error("arithmetic overflow")]
    Overflow,

    #[error(transparent)]
    Timelock(#[from] TimelockError),
}
