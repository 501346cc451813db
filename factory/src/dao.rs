//! A provisioned DAO bundle and its call dispatch.

use daoforge_governance::{
    mint_voting_power, GovernanceError, ProposalEngine, ProposalState, VoteSupport,
};
use daoforge_registry::Registry;
use daoforge_timelock::Timelock;
use daoforge_token::VotingToken;
use daoforge_treasury::{Treasury, TreasuryError};
use daoforge_types::{
    Address, Call, CallPayload, CallRevert, CallSink, ControllerPolicy, DaoId, OpHash, ProposalId,
    Timestamp,
};

/// The four components of one DAO, plus the controller policy they were
/// wired with. Runtime entry points thread the shared registry through for
/// liveness checks.
#[derive(Clone, Debug)]
pub struct Dao {
    pub id: DaoId,
    pub token: VotingToken,
    pub timelock: Timelock,
    pub engine: ProposalEngine,
    pub treasury: Treasury,
    pub controller: ControllerPolicy,
}

impl Dao {
    pub fn propose(
        &mut self,
        proposer: &Address,
        calls: Vec<Call>,
        description_uri: &str,
        registry: &Registry,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        self.engine
            .propose(proposer, calls, description_uri, &self.token, registry, now)
    }

    pub fn cast_vote(
        &mut self,
        voter: &Address,
        id: &ProposalId,
        support: VoteSupport,
        registry: &Registry,
        now: Timestamp,
    ) -> Result<u128, GovernanceError> {
        self.engine
            .cast_vote(voter, id, support, &self.token, registry, now)
    }

    pub fn cast_vote_with_reason(
        &mut self,
        voter: &Address,
        id: &ProposalId,
        support: VoteSupport,
        reason: &str,
        registry: &Registry,
        now: Timestamp,
    ) -> Result<u128, GovernanceError> {
        self.engine
            .cast_vote_with_reason(voter, id, support, reason, &self.token, registry, now)
    }

    pub fn queue(
        &mut self,
        id: &ProposalId,
        registry: &Registry,
        now: Timestamp,
    ) -> Result<OpHash, GovernanceError> {
        self.engine.queue(id, &mut self.timelock, registry, now)
    }

    /// Execute a queued proposal whose delay has elapsed.
    ///
    /// Dispatch runs against clones of the token and treasury which are
    /// committed only when the whole batch succeeds, so a failing sub-call
    /// leaves no partial effect anywhere.
    pub fn execute(&mut self, id: &ProposalId, now: Timestamp) -> Result<(), GovernanceError> {
        let mut token = self.token.clone();
        let mut treasury = self.treasury.clone();
        let withdraw_as = self.withdraw_identity();
        {
            let mut sink = DaoCallSink {
                token: &mut token,
                treasury: &mut treasury,
                withdraw_as,
            };
            self.engine
                .execute(id, &mut self.timelock, &mut sink, now)?;
        }
        self.token = token;
        self.treasury = treasury;
        Ok(())
    }

    pub fn cancel(
        &mut self,
        caller: &Address,
        id: &ProposalId,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        self.engine.cancel(caller, id, &mut self.timelock, now)
    }

    pub fn state(&self, id: &ProposalId, now: Timestamp) -> Result<ProposalState, GovernanceError> {
        self.engine.state(id, now)
    }

    /// Mint voting power outside the proposal pipeline. The caller must hold
    /// the token's minter capability (after provisioning, the timelock).
    pub fn mint_voting_power(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        mint_voting_power(&mut self.token, caller, to, amount, now)
    }

    pub fn deposit_native(
        &mut self,
        from: &Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), TreasuryError> {
        self.treasury.deposit_native(from, amount, now)
    }

    pub fn deposit_asset(
        &mut self,
        from: &Address,
        asset: Address,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), TreasuryError> {
        self.treasury.deposit_asset(from, asset, amount, now)
    }

    /// The identity withdrawals are issued under when the executor dispatches
    /// an approved batch: the component the treasury was wired to trust.
    fn withdraw_identity(&self) -> Address {
        match self.controller {
            ControllerPolicy::Timelock => self.timelock.address(),
            ControllerPolicy::Engine => self.engine.address(),
        }
    }
}

/// Routes executed calls to the owning DAO's components, verifying that each
/// call's target matches the component its payload addresses.
struct DaoCallSink<'a> {
    token: &'a mut VotingToken,
    treasury: &'a mut Treasury,
    withdraw_as: Address,
}

impl CallSink for DaoCallSink<'_> {
    fn apply(&mut self, caller: &Address, call: &Call, now: Timestamp) -> Result<(), CallRevert> {
        let withdraw_as = self.withdraw_as;
        match &call.payload {
            CallPayload::WithdrawNative { to, amount } => {
                self.check_target(call, self.treasury.address())?;
                self.treasury
                    .withdraw_native(&withdraw_as, to, *amount, now)
                    .map_err(|e| CallRevert::with_reason(e.to_string()))
            }
            CallPayload::WithdrawAsset { asset, to, amount } => {
                self.check_target(call, self.treasury.address())?;
                self.treasury
                    .withdraw_asset(&withdraw_as, asset, to, *amount, now)
                    .map_err(|e| CallRevert::with_reason(e.to_string()))
            }
            CallPayload::MintVotingPower { to, amount } => {
                self.check_target(call, *self.token.address())?;
                mint_voting_power(self.token, caller, to, *amount, now)
                    .map_err(|e| CallRevert::with_reason(e.to_string()))
            }
            // Signalling proposals carry no on-ledger effect.
            CallPayload::Note(_) => Ok(()),
        }
    }
}

impl DaoCallSink<'_> {
    fn check_target(&self, call: &Call, expected: Address) -> Result<(), CallRevert> {
        if call.target != expected {
            return Err(CallRevert::with_reason(
                "call target does not match the addressed component",
            ));
        }
        Ok(())
    }
}
