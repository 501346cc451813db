//! Governance-initiated minting of voting power.
//!
//! Proposals can grant voting power to members; this helper is the single
//! entry point they go through. The token kind decides the mint shape
//! explicitly, and fungible mints are capped so no single recipient can
//! accumulate a balance that dominates every future quorum.

use crate::error::GovernanceError;
use daoforge_token::VotingToken;
use daoforge_types::{Address, Timestamp, TokenKind};
use tracing::debug;

/// Hard ceiling on a single recipient's fungible balance. A mint whose
/// resulting balance would reach this is rejected outright.
pub const MAX_VOTING_POWER: u128 = 1_000_000;

/// Mint `amount` of voting power to `to`.
///
/// Fungible tokens get one credit of `amount`; non-fungible tokens get
/// `amount` distinct instances issued one at a time, with the supply room
/// checked up front so a batch never half-completes. The per-recipient
/// ceiling applies only to fungible balances; counted token instances
/// cannot concentrate weight the same way.
pub fn mint_voting_power(
    token: &mut VotingToken,
    caller: &Address,
    to: &Address,
    amount: u128,
    now: Timestamp,
) -> Result<(), GovernanceError> {
    match token.kind() {
        TokenKind::Fungible => {
            let resulting = token
                .balance_of(to)
                .checked_add(amount)
                .ok_or(GovernanceError::Overflow)?;
            if resulting >= MAX_VOTING_POWER {
                return Err(GovernanceError::VotingPowerLimitExceeded {
                    resulting,
                    max: MAX_VOTING_POWER,
                });
            }
            token
                .mint(caller, to, amount, now)
                .map_err(|e| GovernanceError::MintFailed(e.to_string()))?;
        }
        TokenKind::NonFungible => {
            let resulting = token
                .total_supply()
                .checked_add(amount)
                .ok_or(GovernanceError::Overflow)?;
            if token.max_supply() > 0 && resulting > token.max_supply() {
                return Err(GovernanceError::MintFailed(format!(
                    "supply room exhausted: requested total {}, max {}",
                    resulting,
                    token.max_supply()
                )));
            }
            for _ in 0..amount {
                token
                    .mint_one(caller, to, now)
                    .map_err(|e| GovernanceError::MintFailed(e.to_string()))?;
            }
        }
    }
    debug!(to = %to, amount, kind = token.kind().name(), "voting power minted");
    Ok(())
}
