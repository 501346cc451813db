use crate::error::GovernanceError;
use serde::{Deserialize, Serialize};

/// Fixed-at-construction parameters of a proposal engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorParams {
    /// Seconds between proposal creation and the start of voting.
    pub voting_delay_secs: u64,
    /// Seconds the voting window stays open.
    pub voting_period_secs: u64,
    /// Minimum current balance a proposer must hold to create a proposal.
    pub proposal_threshold: u128,
    /// Percentage of snapshotted supply whose affirmative weight a proposal
    /// needs. Must satisfy `1 <= q < 100`.
    pub quorum_percentage: u8,
}

impl GovernorParams {
    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.quorum_percentage < 1 || self.quorum_percentage >= 100 {
            return Err(GovernanceError::InvalidQuorumPercentage(
                self.quorum_percentage,
            ));
        }
        if self.voting_period_secs == 0 {
            return Err(GovernanceError::ZeroVotingPeriod);
        }
        Ok(())
    }
}
