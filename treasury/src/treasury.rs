//! The treasury engine.

use crate::error::TreasuryError;
use daoforge_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Emitted on value movements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasuryEvent {
    Deposit {
        from: Address,
        /// `None` for native value.
        asset: Option<Address>,
        amount: u128,
        at: Timestamp,
    },
    Withdrawal {
        to: Address,
        asset: Option<Address>,
        amount: u128,
        at: Timestamp,
    },
}

/// Holds a DAO's funds. Deposits are open to anyone; withdrawals are gated
/// on the single configured controller address.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Treasury {
    address: Address,
    controller: Address,
    native_balance: u128,
    asset_balances: BTreeMap<Address, u128>,
    events: Vec<TreasuryEvent>,
}

impl Treasury {
    pub fn new(address: Address, controller: Address) -> Self {
        Self {
            address,
            controller,
            native_balance: 0,
            asset_balances: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn controller(&self) -> Address {
        self.controller
    }

    pub fn native_balance(&self) -> u128 {
        self.native_balance
    }

    pub fn asset_balance(&self, asset: &Address) -> u128 {
        self.asset_balances.get(asset).copied().unwrap_or(0)
    }

    /// Deposit native value. Unsolicited; no gate.
    pub fn deposit_native(
        &mut self,
        from: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), TreasuryError> {
        if amount == 0 {
            return Err(TreasuryError::ZeroAmount);
        }
        self.native_balance = self
            .native_balance
            .checked_add(amount)
            .ok_or(TreasuryError::Overflow)?;
        self.events.push(TreasuryEvent::Deposit {
            from: *from,
            asset: None,
            amount,
            at: now,
        });
        debug!(from = %from, amount, "native deposit");
        Ok(())
    }

    /// Deposit a held asset. Unsolicited; no gate.
    pub fn deposit_asset(
        &mut self,
        from: &Address,
        asset: Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), TreasuryError> {
        if amount == 0 {
            return Err(TreasuryError::ZeroAmount);
        }
        let balance = self.asset_balances.entry(asset).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TreasuryError::Overflow)?;
        self.events.push(TreasuryEvent::Deposit {
            from: *from,
            asset: Some(asset),
            amount,
            at: now,
        });
        debug!(from = %from, asset = %asset, amount, "asset deposit");
        Ok(())
    }

    /// Withdraw native value to `to`. Controller only.
    pub fn withdraw_native(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), TreasuryError> {
        self.check_withdrawal(caller, to, amount)?;
        if amount > self.native_balance {
            return Err(TreasuryError::InsufficientFunds {
                needed: amount,
                available: self.native_balance,
            });
        }
        self.native_balance -= amount;
        self.events.push(TreasuryEvent::Withdrawal {
            to: *to,
            asset: None,
            amount,
            at: now,
        });
        debug!(to = %to, amount, "native withdrawal");
        Ok(())
    }

    /// Withdraw a held asset to `to`. Controller only.
    pub fn withdraw_asset(
        &mut self,
        caller: &Address,
        asset: &Address,
        to: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), TreasuryError> {
        self.check_withdrawal(caller, to, amount)?;
        let available = self.asset_balance(asset);
        if amount > available {
            return Err(TreasuryError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        self.asset_balances.insert(*asset, available - amount);
        self.events.push(TreasuryEvent::Withdrawal {
            to: *to,
            asset: Some(*asset),
            amount,
            at: now,
        });
        debug!(to = %to, asset = %asset, amount, "asset withdrawal");
        Ok(())
    }

    /// Drain accumulated events.
    pub fn take_events(&mut self) -> Vec<TreasuryEvent> {
        std::mem::take(&mut self.events)
    }

    fn check_withdrawal(
        &self,
        caller: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), TreasuryError> {
        if *caller != self.controller {
            return Err(TreasuryError::OnlyController);
        }
        if to.is_zero() {
            return Err(TreasuryError::ZeroRecipient);
        }
        if amount == 0 {
            return Err(TreasuryError::ZeroAmount);
        }
        Ok(())
    }
}
