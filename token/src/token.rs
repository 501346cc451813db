//! The voting-power token engine.

use crate::checkpoint::CheckpointHistory;
use crate::error::TokenError;
use daoforge_types::{Address, Role, RoleTable, Timestamp, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Events recorded by the token engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    Minted {
        to: Address,
        amount: u128,
        /// Set for non-fungible mints: the issued token instance.
        token_id: Option<u64>,
        at: Timestamp,
    },
}

/// A voting-power token — fungible or non-fungible, decided at construction.
///
/// For non-fungible tokens a holder's balance is the count of distinct token
/// instances they hold; the vote-weight and supply queries are identical
/// across both kinds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VotingToken {
    address: Address,
    name: String,
    symbol: String,
    base_uri: Option<String>,
    kind: TokenKind,
    /// Hard supply ceiling. Zero means uncapped.
    max_supply: u128,
    total_supply: u128,
    balances: HashMap<Address, u128>,
    /// Non-fungible ownership: token instance id → holder.
    owners: BTreeMap<u64, Address>,
    next_token_id: u64,
    supply_history: CheckpointHistory,
    balance_history: HashMap<Address, CheckpointHistory>,
    roles: RoleTable,
    events: Vec<TokenEvent>,
}

impl VotingToken {
    /// Create a token with `admin` as its initial administrator and minter.
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        kind: TokenKind,
        max_supply: u128,
        base_uri: Option<String>,
        admin: Address,
    ) -> Self {
        let mut roles = RoleTable::new();
        roles.grant(Role::Admin, admin);
        roles.grant(Role::Minter, admin);
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            base_uri,
            kind,
            max_supply,
            total_supply: 0,
            balances: HashMap::new(),
            owners: BTreeMap::new(),
            next_token_id: 1,
            supply_history: CheckpointHistory::new(),
            balance_history: HashMap::new(),
            roles,
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn max_supply(&self) -> u128 {
        self.max_supply
    }

    // ── Balance and supply queries ───────────────────────────────────────

    pub fn balance_of(&self, holder: &Address) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Total supply as of `point`.
    pub fn past_total_supply(&self, point: Timestamp) -> u128 {
        self.supply_history.value_at(point)
    }

    /// A holder's balance as of `point`.
    pub fn past_balance_of(&self, holder: &Address, point: Timestamp) -> u128 {
        self.balance_history
            .get(holder)
            .map(|h| h.value_at(point))
            .unwrap_or(0)
    }

    /// The holder of a non-fungible token instance.
    pub fn owner_of(&self, token_id: u64) -> Option<&Address> {
        self.owners.get(&token_id)
    }

    // ── Minting ──────────────────────────────────────────────────────────

    /// Mint `amount` fungible units to `to`. Role-gated to `Minter`.
    pub fn mint(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), TokenError> {
        if self.kind != TokenKind::Fungible {
            return Err(TokenError::WrongTokenKind);
        }
        if !self.roles.has(Role::Minter, caller) {
            return Err(TokenError::NotAuthorized(Role::Minter));
        }
        if to.is_zero() {
            return Err(TokenError::ZeroRecipient);
        }
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }
        self.credit(to, amount, now)?;
        debug!(to = %to, amount, "minted voting power");
        self.events.push(TokenEvent::Minted {
            to: *to,
            amount,
            token_id: None,
            at: now,
        });
        Ok(())
    }

    /// Issue one distinct non-fungible token to `to`. Role-gated to `Minter`.
    /// Returns the issued token instance id.
    pub fn mint_one(
        &mut self,
        caller: &Address,
        to: &Address,
        now: Timestamp,
    ) -> Result<u64, TokenError> {
        if self.kind != TokenKind::NonFungible {
            return Err(TokenError::WrongTokenKind);
        }
        if !self.roles.has(Role::Minter, caller) {
            return Err(TokenError::NotAuthorized(Role::Minter));
        }
        if to.is_zero() {
            return Err(TokenError::ZeroRecipient);
        }
        self.credit(to, 1, now)?;
        let token_id = self.next_token_id;
        self.next_token_id = self.next_token_id.checked_add(1).ok_or(TokenError::Overflow)?;
        self.owners.insert(token_id, *to);
        debug!(to = %to, token_id, "issued voting token");
        self.events.push(TokenEvent::Minted {
            to: *to,
            amount: 1,
            token_id: Some(token_id),
            at: now,
        });
        Ok(token_id)
    }

    /// Shared balance/supply/checkpoint bookkeeping for both mint shapes.
    fn credit(&mut self, to: &Address, amount: u128, now: Timestamp) -> Result<(), TokenError> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        if self.max_supply > 0 && new_supply > self.max_supply {
            return Err(TokenError::MaxSupplyExceeded {
                requested: new_supply,
                max: self.max_supply,
            });
        }
        let balance = self.balances.entry(*to).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        let new_balance = *balance;
        self.total_supply = new_supply;
        self.supply_history.push(now, new_supply);
        self.balance_history
            .entry(*to)
            .or_default()
            .push(now, new_balance);
        Ok(())
    }

    // ── Capability management ────────────────────────────────────────────

    /// Grant `role` to `subject`. Admin-gated.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        subject: Address,
    ) -> Result<(), TokenError> {
        if !self.roles.has(Role::Admin, caller) {
            return Err(TokenError::NotAuthorized(Role::Admin));
        }
        self.roles.grant(role, subject);
        Ok(())
    }

    /// Revoke `role` from `subject`. Admin-gated.
    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        subject: &Address,
    ) -> Result<(), TokenError> {
        if !self.roles.has(Role::Admin, caller) {
            return Err(TokenError::NotAuthorized(Role::Admin));
        }
        self.roles.revoke(role, subject);
        Ok(())
    }

    /// Give up a role held by the caller themselves.
    pub fn renounce_role(&mut self, caller: &Address, role: Role) {
        self.roles.revoke(role, caller);
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// Drain recorded events (test and observability hook).
    pub fn take_events(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 32])
    }

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    fn fungible(max_supply: u128) -> VotingToken {
        VotingToken::new(
            addr(100),
            "Voting Token",
            "VOTE",
            TokenKind::Fungible,
            max_supply,
            None,
            addr(1),
        )
    }

    fn nonfungible() -> VotingToken {
        VotingToken::new(
            addr(100),
            "Voting Badge",
            "BADGE",
            TokenKind::NonFungible,
            0,
            Some("ipfs://badges/".to_string()),
            addr(1),
        )
    }

    #[test]
    fn mint_credits_balance_and_supply() {
        let mut token = fungible(0);
        token.mint(&addr(1), &addr(2), 500, ts(100)).unwrap();
        assert_eq!(token.balance_of(&addr(2)), 500);
        assert_eq!(token.total_supply(), 500);
    }

    #[test]
    fn mint_requires_minter_role() {
        let mut token = fungible(0);
        let result = token.mint(&addr(9), &addr(2), 500, ts(100));
        assert_eq!(result, Err(TokenError::NotAuthorized(Role::Minter)));
    }

    #[test]
    fn mint_rejects_zero_recipient_and_amount() {
        let mut token = fungible(0);
        assert_eq!(
            token.mint(&addr(1), &Address::ZERO, 500, ts(100)),
            Err(TokenError::ZeroRecipient)
        );
        assert_eq!(
            token.mint(&addr(1), &addr(2), 0, ts(100)),
            Err(TokenError::ZeroAmount)
        );
    }

    #[test]
    fn max_supply_cap_enforced() {
        let mut token = fungible(1000);
        token.mint(&addr(1), &addr(2), 900, ts(100)).unwrap();
        let result = token.mint(&addr(1), &addr(3), 200, ts(101));
        assert_eq!(
            result,
            Err(TokenError::MaxSupplyExceeded {
                requested: 1100,
                max: 1000
            })
        );
        // Nothing was credited by the rejected mint.
        assert_eq!(token.total_supply(), 900);
        assert_eq!(token.balance_of(&addr(3)), 0);
    }

    #[test]
    fn past_reads_are_fixed_points() {
        let mut token = fungible(0);
        token.mint(&addr(1), &addr(2), 100, ts(100)).unwrap();
        token.mint(&addr(1), &addr(2), 50, ts(200)).unwrap();

        assert_eq!(token.past_balance_of(&addr(2), ts(100)), 100);
        assert_eq!(token.past_balance_of(&addr(2), ts(150)), 100);
        assert_eq!(token.past_balance_of(&addr(2), ts(200)), 150);
        assert_eq!(token.past_total_supply(ts(99)), 0);
        assert_eq!(token.past_total_supply(ts(150)), 100);

        // Later mints never rewrite history.
        token.mint(&addr(1), &addr(3), 1000, ts(300)).unwrap();
        assert_eq!(token.past_balance_of(&addr(2), ts(150)), 100);
        assert_eq!(token.past_total_supply(ts(150)), 100);
    }

    #[test]
    fn nonfungible_mint_issues_distinct_tokens() {
        let mut token = nonfungible();
        let a = token.mint_one(&addr(1), &addr(2), ts(100)).unwrap();
        let b = token.mint_one(&addr(1), &addr(2), ts(100)).unwrap();
        assert_ne!(a, b);
        assert_eq!(token.balance_of(&addr(2)), 2);
        assert_eq!(token.total_supply(), 2);
        assert_eq!(token.owner_of(a), Some(&addr(2)));
        assert_eq!(token.owner_of(b), Some(&addr(2)));
    }

    #[test]
    fn mint_shapes_match_token_kind() {
        let mut f = fungible(0);
        assert_eq!(
            f.mint_one(&addr(1), &addr(2), ts(100)),
            Err(TokenError::WrongTokenKind)
        );
        let mut nf = nonfungible();
        assert_eq!(
            nf.mint(&addr(1), &addr(2), 5, ts(100)),
            Err(TokenError::WrongTokenKind)
        );
    }

    #[test]
    fn role_management_is_admin_gated() {
        let mut token = fungible(0);
        assert!(token.grant_role(&addr(9), Role::Minter, addr(3)).is_err());

        token.grant_role(&addr(1), Role::Minter, addr(3)).unwrap();
        token.mint(&addr(3), &addr(4), 10, ts(100)).unwrap();

        token.revoke_role(&addr(1), Role::Minter, &addr(3)).unwrap();
        assert!(token.mint(&addr(3), &addr(4), 10, ts(101)).is_err());

        // Renouncing admin removes the caller's own grant.
        token.renounce_role(&addr(1), Role::Admin);
        assert!(token.grant_role(&addr(1), Role::Minter, addr(5)).is_err());
    }

    #[test]
    fn mint_records_events() {
        let mut token = fungible(0);
        token.mint(&addr(1), &addr(2), 500, ts(100)).unwrap();
        let events = token.take_events();
        assert_eq!(
            events,
            vec![TokenEvent::Minted {
                to: addr(2),
                amount: 500,
                token_id: None,
                at: ts(100)
            }]
        );
        assert!(token.take_events().is_empty());
    }
}
