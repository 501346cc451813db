//! The delayed-executor engine.

use crate::error::TimelockError;
use crate::operation::{OperationState, QueuedOperation};
use daoforge_crypto::hash::operation_hash;
use daoforge_types::{Address, Call, CallSink, OpHash, Role, RoleTable, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Hard lower bound on the configured delay, in seconds. A DAO can pick any
/// delay at or above this; nothing can configure a shorter one.
pub const MIN_DELAY_FLOOR_SECS: u64 = 24 * 60 * 60;

/// Emitted on operation lifecycle transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelockEvent {
    Queued {
        id: OpHash,
        eta: Timestamp,
        at: Timestamp,
    },
    Executed {
        id: OpHash,
        at: Timestamp,
    },
    Canceled {
        id: OpHash,
        at: Timestamp,
    },
}

/// The delayed executor. Operations are keyed by a deterministic hash of
/// their calls, predecessor, and salt; queueing starts the delay clock and
/// execution dispatches the batch through a [`CallSink`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Timelock {
    address: Address,
    min_delay_secs: u64,
    operations: HashMap<OpHash, QueuedOperation>,
    roles: RoleTable,
    events: Vec<TimelockEvent>,
}

impl Timelock {
    /// Create an executor with the given delay. Fails if the delay is below
    /// [`MIN_DELAY_FLOOR_SECS`].
    pub fn new(
        address: Address,
        admin: Address,
        min_delay_secs: u64,
    ) -> Result<Self, TimelockError> {
        if min_delay_secs < MIN_DELAY_FLOOR_SECS {
            return Err(TimelockError::DelayTooShortForSecurity {
                min_delay_secs,
                floor: MIN_DELAY_FLOOR_SECS,
            });
        }
        let mut roles = RoleTable::new();
        roles.grant(Role::Admin, admin);
        Ok(Self {
            address,
            min_delay_secs,
            operations: HashMap::new(),
            roles,
            events: Vec::new(),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn min_delay_secs(&self) -> u64 {
        self.min_delay_secs
    }

    /// The operation hash this executor would assign to a batch.
    pub fn hash_operation(
        &self,
        calls: &[Call],
        predecessor: Option<&OpHash>,
        salt: &[u8; 32],
    ) -> OpHash {
        operation_hash(calls, predecessor, salt)
    }

    pub fn operation(&self, id: &OpHash) -> Option<&QueuedOperation> {
        self.operations.get(id)
    }

    pub fn is_ready(&self, id: &OpHash, now: Timestamp) -> bool {
        self.operations
            .get(id)
            .map(|op| op.is_ready(now))
            .unwrap_or(false)
    }

    /// Queue a call batch. The operation becomes executable at
    /// `now + min_delay_secs`.
    pub fn queue(
        &mut self,
        caller: &Address,
        calls: Vec<Call>,
        predecessor: Option<OpHash>,
        salt: [u8; 32],
        now: Timestamp,
    ) -> Result<OpHash, TimelockError> {
        self.require_role(Role::Proposer, caller)?;

        let id = operation_hash(&calls, predecessor.as_ref(), &salt);
        if self.operations.contains_key(&id) {
            return Err(TimelockError::AlreadyQueued);
        }

        let eta = now.plus(self.min_delay_secs);
        self.operations.insert(
            id,
            QueuedOperation {
                calls,
                predecessor,
                salt,
                eta,
                state: OperationState::Queued,
                queued_at: now,
            },
        );
        self.events.push(TimelockEvent::Queued { id, eta, at: now });
        debug!(op = ?id, eta = eta.as_secs(), "operation queued");
        Ok(id)
    }

    /// Execute a ready operation, dispatching each call through `sink` in
    /// order. The operation is marked executed only if every call succeeds;
    /// on failure it stays queued and may be retried or canceled.
    pub fn execute(
        &mut self,
        caller: &Address,
        id: &OpHash,
        sink: &mut dyn CallSink,
        now: Timestamp,
    ) -> Result<(), TimelockError> {
        self.require_role(Role::Executor, caller)?;

        let op = self
            .operations
            .get(id)
            .ok_or(TimelockError::UnknownOperation)?;
        match op.state {
            OperationState::Queued => {}
            OperationState::Executed => return Err(TimelockError::AlreadyExecuted),
            OperationState::Canceled => return Err(TimelockError::OperationCanceled),
        }
        if now < op.eta {
            return Err(TimelockError::NotReady { eta: op.eta, now });
        }
        if let Some(pred) = &op.predecessor {
            let done = self
                .operations
                .get(pred)
                .map(|p| p.state == OperationState::Executed)
                .unwrap_or(false);
            if !done {
                return Err(TimelockError::PredecessorNotExecuted);
            }
        }

        let calls = op.calls.clone();
        let executor = self.address;
        for call in &calls {
            sink.apply(&executor, call, now).map_err(|revert| {
                TimelockError::CallFailed(
                    revert
                        .reason
                        .unwrap_or_else(|| "call reverted without a reason".to_string()),
                )
            })?;
        }

        // All calls applied; only now does the state flip.
        if let Some(op) = self.operations.get_mut(id) {
            op.state = OperationState::Executed;
        }
        self.events.push(TimelockEvent::Executed { id: *id, at: now });
        debug!(op = ?id, calls = calls.len(), "operation executed");
        Ok(())
    }

    /// Cancel a queued operation. Executed operations cannot be canceled.
    pub fn cancel(
        &mut self,
        caller: &Address,
        id: &OpHash,
        now: Timestamp,
    ) -> Result<(), TimelockError> {
        self.require_role(Role::Canceller, caller)?;

        let op = self
            .operations
            .get_mut(id)
            .ok_or(TimelockError::UnknownOperation)?;
        match op.state {
            OperationState::Queued => {}
            OperationState::Executed => return Err(TimelockError::AlreadyExecuted),
            OperationState::Canceled => return Err(TimelockError::OperationCanceled),
        }
        op.state = OperationState::Canceled;
        self.events.push(TimelockEvent::Canceled { id: *id, at: now });
        debug!(op = ?id, "operation canceled");
        Ok(())
    }

    pub fn has_role(&self, role: Role, subject: &Address) -> bool {
        self.roles.has(role, subject)
    }

    pub fn is_open_role(&self, role: Role) -> bool {
        self.roles.is_open(role)
    }

    pub fn role_holders(&self, role: Role) -> Vec<Address> {
        self.roles.holders(role)
    }

    pub fn is_sole_admin(&self, subject: &Address) -> bool {
        self.roles.is_sole_holder(Role::Admin, subject)
    }

    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        subject: Address,
    ) -> Result<(), TimelockError> {
        self.require_role(Role::Admin, caller)?;
        self.roles.grant(role, subject);
        Ok(())
    }

    /// Open a role to every address.
    pub fn grant_open_role(&mut self, caller: &Address, role: Role) -> Result<(), TimelockError> {
        self.require_role(Role::Admin, caller)?;
        self.roles.grant_open(role);
        Ok(())
    }

    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        subject: &Address,
    ) -> Result<(), TimelockError> {
        self.require_role(Role::Admin, caller)?;
        self.roles.revoke(role, subject);
        Ok(())
    }

    /// Give up one's own role. Needs no admin grant.
    pub fn renounce_role(&mut self, caller: &Address, role: Role) {
        self.roles.revoke(role, caller);
    }

    /// Drain accumulated events.
    pub fn take_events(&mut self) -> Vec<TimelockEvent> {
        std::mem::take(&mut self.events)
    }

    fn require_role(&self, role: Role, subject: &Address) -> Result<(), TimelockError> {
        if self.roles.has(role, subject) {
            Ok(())
        } else {
            Err(TimelockError::NotAuthorized(role))
        }
    }
}
