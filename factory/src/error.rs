use daoforge_governance::GovernanceError;
use daoforge_registry::RegistryError;
use daoforge_timelock::TimelockError;
use daoforge_token::TokenError;
use daoforge_types::ConfigError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProvisionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Timelock(#[from] TimelockError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("token setup failed: {0}")]
    Token(#[from] TokenError),

    #[error("capability handoff incomplete: {0}")]
    HandoffIncomplete(&'static str),
}
