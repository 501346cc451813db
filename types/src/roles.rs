//! Typed capability grants.
//!
//! Every role-gated action in the system checks a `(role, subject)` pair in
//! the owning component's [`RoleTable`]. A role may also be opened to the
//! public, in which case every subject holds it.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The capability roles recognized across components.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Role {
    /// May grant and revoke roles on the owning component.
    Admin,
    /// May mint voting-power tokens.
    Minter,
    /// May queue operations into the delayed executor.
    Proposer,
    /// May execute queued operations once their delay has elapsed.
    Executor,
    /// May cancel queued, not-yet-executed operations.
    Canceller,
    /// May withdraw from the treasury.
    Controller,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Minter => "minter",
            Self::Proposer => "proposer",
            Self::Executor => "executor",
            Self::Canceller => "canceller",
            Self::Controller => "controller",
        }
    }
}

/// A typed capability-grant table keyed by `(role, subject)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTable {
    grants: BTreeSet<(Role, Address)>,
    open: BTreeSet<Role>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `role` to `subject`. Granting twice is a no-op.
    pub fn grant(&mut self, role: Role, subject: Address) {
        self.grants.insert((role, subject));
    }

    /// Open `role` to every subject (the public capability).
    pub fn grant_open(&mut self, role: Role) {
        self.open.insert(role);
    }

    /// Remove a grant. Revoking an absent grant is a no-op.
    pub fn revoke(&mut self, role: Role, subject: &Address) {
        self.grants.remove(&(role, *subject));
    }

    /// Close a previously opened role.
    pub fn revoke_open(&mut self, role: Role) {
        self.open.remove(&role);
    }

    /// Whether `subject` holds `role`, either via an explicit grant or
    /// because the role is open.
    pub fn has(&self, role: Role, subject: &Address) -> bool {
        self.open.contains(&role) || self.grants.contains(&(role, *subject))
    }

    /// Whether `role` is open to everyone.
    pub fn is_open(&self, role: Role) -> bool {
        self.open.contains(&role)
    }

    /// All explicit holders of `role`, in address order.
    pub fn holders(&self, role: Role) -> Vec<Address> {
        self.grants
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, a)| *a)
            .collect()
    }

    /// Whether `subject` is the only holder of `role` and the role is not open.
    pub fn is_sole_holder(&self, role: Role, subject: &Address) -> bool {
        !self.open.contains(&role) && self.holders(role) == [*subject]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 32])
    }

    #[test]
    fn grant_and_revoke() {
        let mut table = RoleTable::new();
        let a = addr(1);
        assert!(!table.has(Role::Admin, &a));

        table.grant(Role::Admin, a);
        assert!(table.has(Role::Admin, &a));
        assert!(!table.has(Role::Minter, &a));

        table.revoke(Role::Admin, &a);
        assert!(!table.has(Role::Admin, &a));
    }

    #[test]
    fn open_role_covers_everyone() {
        let mut table = RoleTable::new();
        table.grant_open(Role::Executor);
        assert!(table.has(Role::Executor, &addr(1)));
        assert!(table.has(Role::Executor, &addr(200)));

        table.revoke_open(Role::Executor);
        assert!(!table.has(Role::Executor, &addr(1)));
    }

    #[test]
    fn sole_holder() {
        let mut table = RoleTable::new();
        let a = addr(1);
        let b = addr(2);

        table.grant(Role::Admin, a);
        assert!(table.is_sole_holder(Role::Admin, &a));

        table.grant(Role::Admin, b);
        assert!(!table.is_sole_holder(Role::Admin, &a));

        table.revoke(Role::Admin, &b);
        assert!(table.is_sole_holder(Role::Admin, &a));

        // An open role has no sole holder.
        table.grant_open(Role::Admin);
        assert!(!table.is_sole_holder(Role::Admin, &a));
    }

    #[test]
    fn holders_are_sorted_and_scoped_to_role() {
        let mut table = RoleTable::new();
        table.grant(Role::Proposer, addr(3));
        table.grant(Role::Proposer, addr(1));
        table.grant(Role::Canceller, addr(2));

        assert_eq!(table.holders(Role::Proposer), vec![addr(1), addr(3)]);
        assert_eq!(table.holders(Role::Canceller), vec![addr(2)]);
        assert!(table.holders(Role::Executor).is_empty());
    }
}
