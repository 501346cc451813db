//! Typed calls executed through the delayed executor.
//!
//! Payloads are a closed enum rather than opaque bytes: every operation a
//! proposal can schedule is named here, and dispatch is a typed match instead
//! of dynamic signature probing.

use crate::address::Address;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// One call in a proposal's batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// The component this call is addressed to.
    pub target: Address,
    /// Native value attached to the call.
    pub value: u128,
    /// What the call does.
    pub payload: CallPayload,
}

/// The typed payload of a [`Call`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallPayload {
    /// Withdraw native value from the treasury.
    WithdrawNative { to: Address, amount: u128 },
    /// Withdraw a held asset from the treasury.
    WithdrawAsset {
        asset: Address,
        to: Address,
        amount: u128,
    },
    /// Mint voting power to a recipient via the governance minting helper.
    MintVotingPower { to: Address, amount: u128 },
    /// A no-op marker for signalling proposals with no on-ledger effect.
    Note(String),
}

impl CallPayload {
    /// Stable discriminant used when hashing calls into identifiers.
    pub fn discriminant(&self) -> u8 {
        match self {
            Self::WithdrawNative { .. } => 0,
            Self::WithdrawAsset { .. } => 1,
            Self::MintVotingPower { .. } => 2,
            Self::Note(_) => 3,
        }
    }
}

/// Failure of a dispatched sub-call.
///
/// Carries the underlying revert reason verbatim when one exists; the
/// executor falls back to a generic signal only when no reason was provided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRevert {
    pub reason: Option<String>,
}

impl CallRevert {
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    /// A revert that carried no reason.
    pub fn silent() -> Self {
        Self { reason: None }
    }
}

/// Dispatch target for delayed execution.
///
/// The executor applies calls one at a time; each call's state transition
/// must be fully committed before the next call is invoked.
pub trait CallSink {
    fn apply(&mut self, caller: &Address, call: &Call, now: Timestamp) -> Result<(), CallRevert>;
}
