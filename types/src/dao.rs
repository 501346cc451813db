//! DAO identifiers and token flavor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential identifier for a provisioned DAO, assigned by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DaoId(u64);

impl DaoId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DaoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dao-{}", self.0)
    }
}

/// The flavor of a DAO's voting-power token.
///
/// Decided once at provisioning time and threaded through explicitly; the
/// system never probes a token at runtime to discover its mint shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Divisible balances; one mint call credits an arbitrary amount.
    Fungible,
    /// Distinct token instances; each mint issues exactly one token.
    NonFungible,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fungible => "fungible",
            Self::NonFungible => "non-fungible",
        }
    }
}
