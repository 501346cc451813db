//! Provisioning configuration — every policy knob a new DAO is created with.

use crate::dao::TokenKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which component controls treasury withdrawals.
///
/// Deployment variants differ on whether the delayed executor or the proposal
/// engine holds the controller capability. This is a policy choice, not a core
/// invariant, so it is an explicit configuration option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerPolicy {
    /// The delayed executor controls withdrawals (the common deployment).
    Timelock,
    /// The proposal engine controls withdrawals directly.
    Engine,
}

/// Structured configuration for provisioning one DAO.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProvisionConfig {
    /// URI of the DAO's off-ledger metadata. Must be non-empty.
    pub metadata_uri: String,
    /// Voting-power token name.
    pub token_name: String,
    /// Voting-power token symbol.
    pub token_symbol: String,
    /// Supply minted to the creator at provisioning (fungible tokens only).
    pub initial_supply: u128,
    /// Hard supply ceiling enforced on every mint. Zero means uncapped.
    pub max_supply: u128,
    /// Seconds between proposal creation and the start of voting.
    pub voting_delay_secs: u64,
    /// Seconds the voting window stays open.
    pub voting_period_secs: u64,
    /// Minimum voting power required to create a proposal.
    pub proposal_threshold: u128,
    /// Minimum delay between queueing and executing an operation.
    pub timelock_delay_secs: u64,
    /// Quorum as a percentage of snapshotted supply, `1 <= q < 100`.
    pub quorum_percentage: u8,
    /// Fungible or non-fungible voting power.
    pub token_kind: TokenKind,
    /// Base URI for non-fungible token metadata.
    pub base_uri: Option<String>,
    /// Which component holds the treasury controller capability.
    pub controller: ControllerPolicy,
    /// Whether anyone may execute a matured operation, or only the engine.
    pub open_execution: bool,
}

impl ProvisionConfig {
    /// A reasonable starting configuration: fungible token, 2-day timelock,
    /// 1-day voting delay, 1-week voting period, 10% quorum, open execution.
    pub fn standard(metadata_uri: &str, token_name: &str, token_symbol: &str) -> Self {
        Self {
            metadata_uri: metadata_uri.to_string(),
            token_name: token_name.to_string(),
            token_symbol: token_symbol.to_string(),
            initial_supply: 0,
            max_supply: 0,
            voting_delay_secs: 24 * 3600,
            voting_period_secs: 7 * 24 * 3600,
            proposal_threshold: 0,
            timelock_delay_secs: 2 * 24 * 3600,
            quorum_percentage: 10,
            token_kind: TokenKind::Fungible,
            base_uri: None,
            controller: ControllerPolicy::Timelock,
            open_execution: true,
        }
    }

    /// Validate everything that can be checked before any state is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metadata_uri.is_empty() {
            return Err(ConfigError::EmptyMetadata);
        }
        if self.token_name.is_empty() || self.token_symbol.is_empty() {
            return Err(ConfigError::EmptyTokenIdentity);
        }
        if self.voting_period_secs == 0 {
            return Err(ConfigError::ZeroVotingPeriod);
        }
        if self.max_supply > 0 && self.initial_supply > self.max_supply {
            return Err(ConfigError::InitialSupplyExceedsMax {
                initial: self.initial_supply,
                max: self.max_supply,
            });
        }
        if self.token_kind == TokenKind::NonFungible && self.initial_supply > 0 {
            return Err(ConfigError::InitialSupplyForNonFungible);
        }
        Ok(())
    }
}

/// Rejections raised by [`ProvisionConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("metadata URI must not be empty")]
    EmptyMetadata,

    #[error("token name and symbol must not be empty")]
    EmptyTokenIdentity,

    #[error("voting period must be greater than zero")]
    ZeroVotingPeriod,

    #[error("initial supply {initial} exceeds max supply {max}")]
    InitialSupplyExceedsMax { initial: u128, max: u128 },

    #[error("non-fungible tokens cannot be pre-minted via initial supply")]
    InitialSupplyForNonFungible,
}
