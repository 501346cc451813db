//! The proposal engine.

use crate::error::GovernanceError;
use crate::params::GovernorParams;
use crate::proposal::{Proposal, ProposalState, Tally, VoteSupport};
use daoforge_crypto::hash::proposal_id;
use daoforge_registry::Registry;
use daoforge_store::{GovernanceStore, StoreError};
use daoforge_timelock::Timelock;
use daoforge_token::VotingToken;
use daoforge_types::{Address, Call, CallSink, DaoId, OpHash, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Emitted on proposal lifecycle transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    ProposalCreated {
        id: ProposalId,
        proposer: Address,
        at: Timestamp,
    },
    VoteCast {
        id: ProposalId,
        voter: Address,
        support: VoteSupport,
        weight: u128,
        reason: Option<String>,
        at: Timestamp,
    },
    ProposalQueued {
        id: ProposalId,
        operation: OpHash,
        at: Timestamp,
    },
    ProposalExecuted {
        id: ProposalId,
        at: Timestamp,
    },
    ProposalCanceled {
        id: ProposalId,
        at: Timestamp,
    },
}

/// The governance state machine for one DAO.
///
/// The engine holds no funds and never mutates the token directly; approved
/// proposals reach other components only through the delayed executor, with
/// the engine's own address as the queueing and canceling identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalEngine {
    address: Address,
    dao_id: DaoId,
    params: GovernorParams,
    proposals: HashMap<ProposalId, Proposal>,
    events: Vec<GovernanceEvent>,
}

impl ProposalEngine {
    pub fn new(
        address: Address,
        dao_id: DaoId,
        params: GovernorParams,
    ) -> Result<Self, GovernanceError> {
        params.validate()?;
        Ok(Self {
            address,
            dao_id,
            params,
            proposals: HashMap::new(),
            events: Vec::new(),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn dao_id(&self) -> DaoId {
        self.dao_id
    }

    pub fn params(&self) -> &GovernorParams {
        &self.params
    }

    pub fn proposal(&self, id: &ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    /// Exact `floor(supply * q / 100)`, overflow-free for any u128 supply.
    pub fn quorum(&self, supply_at_snapshot: u128) -> u128 {
        let q = self.params.quorum_percentage as u128;
        (supply_at_snapshot / 100) * q + (supply_at_snapshot % 100) * q / 100
    }

    /// The lifecycle state of a proposal at `now`.
    pub fn state(&self, id: &ProposalId, now: Timestamp) -> Result<ProposalState, GovernanceError> {
        let proposal = self
            .proposals
            .get(id)
            .ok_or(GovernanceError::UnknownProposal(*id))?;
        Ok(proposal.state(self.quorum(proposal.supply_at_snapshot), now))
    }

    /// Create a proposal. The id is derived from the DAO, calls, and
    /// description, so re-submitting identical inputs is detected as a
    /// duplicate rather than creating a second proposal.
    pub fn propose(
        &mut self,
        proposer: &Address,
        calls: Vec<Call>,
        description_uri: &str,
        token: &VotingToken,
        registry: &Registry,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        if description_uri.is_empty() {
            return Err(GovernanceError::InvalidMetadata);
        }
        self.require_live(registry)?;
        if calls.is_empty() {
            return Err(GovernanceError::EmptyProposal);
        }
        let held = token.balance_of(proposer);
        if held < self.params.proposal_threshold {
            return Err(GovernanceError::BelowProposalThreshold {
                required: self.params.proposal_threshold,
                held,
            });
        }

        let id = proposal_id(self.dao_id, &calls, description_uri);
        if self.proposals.contains_key(&id) {
            return Err(GovernanceError::AlreadyExists(id));
        }

        let vote_start = now.plus(self.params.voting_delay_secs);
        self.proposals.insert(
            id,
            Proposal {
                id,
                proposer: *proposer,
                calls,
                description_uri: description_uri.to_string(),
                created_at: now,
                snapshot: now,
                vote_start,
                vote_end: vote_start.plus(self.params.voting_period_secs),
                supply_at_snapshot: token.total_supply(),
                tally: Tally::default(),
                voters: BTreeSet::new(),
                operation: None,
                executed: false,
                canceled: false,
            },
        );
        self.events.push(GovernanceEvent::ProposalCreated {
            id,
            proposer: *proposer,
            at: now,
        });
        info!(%id, proposer = %proposer, "proposal created");
        Ok(id)
    }

    pub fn cast_vote(
        &mut self,
        voter: &Address,
        id: &ProposalId,
        support: VoteSupport,
        token: &VotingToken,
        registry: &Registry,
        now: Timestamp,
    ) -> Result<u128, GovernanceError> {
        self.vote(voter, id, support, None, token, registry, now)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cast_vote_with_reason(
        &mut self,
        voter: &Address,
        id: &ProposalId,
        support: VoteSupport,
        reason: &str,
        token: &VotingToken,
        registry: &Registry,
        now: Timestamp,
    ) -> Result<u128, GovernanceError> {
        self.vote(
            voter,
            id,
            support,
            Some(reason.to_string()),
            token,
            registry,
            now,
        )
    }

    /// Queue a succeeded proposal into the delayed executor. The engine is
    /// the caller the executor sees; the proposal id doubles as the salt.
    pub fn queue(
        &mut self,
        id: &ProposalId,
        timelock: &mut Timelock,
        registry: &Registry,
        now: Timestamp,
    ) -> Result<OpHash, GovernanceError> {
        self.require_live(registry)?;
        let quorum_supply = self.snapshot_supply(id)?;
        let proposal = self
            .proposals
            .get(id)
            .ok_or(GovernanceError::UnknownProposal(*id))?;
        if proposal.state(self.quorum(quorum_supply), now) != ProposalState::Succeeded {
            return Err(GovernanceError::ProposalNotSucceeded);
        }

        let engine = self.address;
        let operation =
            timelock.queue(&engine, proposal.calls.clone(), None, *id.as_bytes(), now)?;
        if let Some(proposal) = self.proposals.get_mut(id) {
            proposal.operation = Some(operation);
        }
        self.events.push(GovernanceEvent::ProposalQueued {
            id: *id,
            operation,
            at: now,
        });
        info!(%id, op = ?operation, "proposal queued");
        Ok(operation)
    }

    /// Execute a queued proposal once its delay has elapsed. Dispatch happens
    /// inside the delayed executor; the proposal flips to executed only when
    /// every call succeeded.
    pub fn execute(
        &mut self,
        id: &ProposalId,
        timelock: &mut Timelock,
        sink: &mut dyn CallSink,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get(id)
            .ok_or(GovernanceError::UnknownProposal(*id))?;
        if proposal.canceled {
            return Err(GovernanceError::AlreadyCanceled);
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted);
        }
        let operation = proposal.operation.ok_or(GovernanceError::NotQueued)?;

        let engine = self.address;
        timelock.execute(&engine, &operation, sink, now)?;

        if let Some(proposal) = self.proposals.get_mut(id) {
            proposal.executed = true;
        }
        self.events
            .push(GovernanceEvent::ProposalExecuted { id: *id, at: now });
        info!(%id, "proposal executed");
        Ok(())
    }

    /// Cancel a proposal. Only its proposer may; executed proposals are
    /// immutable. A queued operation is canceled in the executor too.
    pub fn cancel(
        &mut self,
        caller: &Address,
        id: &ProposalId,
        timelock: &mut Timelock,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get(id)
            .ok_or(GovernanceError::UnknownProposal(*id))?;
        if proposal.proposer != *caller {
            return Err(GovernanceError::OnlyProposer);
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted);
        }
        if proposal.canceled {
            return Err(GovernanceError::AlreadyCanceled);
        }
        let operation = proposal.operation;

        if let Some(operation) = operation {
            let engine = self.address;
            timelock.cancel(&engine, &operation, now)?;
        }
        if let Some(proposal) = self.proposals.get_mut(id) {
            proposal.canceled = true;
        }
        self.events
            .push(GovernanceEvent::ProposalCanceled { id: *id, at: now });
        info!(%id, "proposal canceled");
        Ok(())
    }

    /// Drain accumulated events.
    pub fn take_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Persist all proposals.
    pub fn save_to_store(&self, store: &dyn GovernanceStore) -> Result<(), StoreError> {
        for proposal in self.proposals.values() {
            let data = bincode::serialize(proposal)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            store.put_proposal(&proposal.id, &data)?;
        }
        Ok(())
    }

    /// Rebuild an engine from storage. Parameters are not persisted; they
    /// are fixed at provisioning and supplied by the caller.
    pub fn load_from_store(
        address: Address,
        dao_id: DaoId,
        params: GovernorParams,
        store: &dyn GovernanceStore,
    ) -> Result<Self, StoreError> {
        let mut engine = Self::new(address, dao_id, params)
            .map_err(|e| StoreError::Corruption(e.to_string()))?;
        for (id, data) in store.list_proposals()? {
            let proposal: Proposal = bincode::deserialize(&data)
                .map_err(|e| StoreError::Corruption(format!("{}: {}", id, e)))?;
            engine.proposals.insert(id, proposal);
        }
        Ok(engine)
    }

    #[allow(clippy::too_many_arguments)]
    fn vote(
        &mut self,
        voter: &Address,
        id: &ProposalId,
        support: VoteSupport,
        reason: Option<String>,
        token: &VotingToken,
        registry: &Registry,
        now: Timestamp,
    ) -> Result<u128, GovernanceError> {
        self.require_live(registry)?;
        let quorum_supply = self.snapshot_supply(id)?;
        let quorum = self.quorum(quorum_supply);
        let proposal = self
            .proposals
            .get_mut(id)
            .ok_or(GovernanceError::UnknownProposal(*id))?;

        if proposal.state(quorum, now) != ProposalState::Active {
            return Err(GovernanceError::VotingNotOpen);
        }
        if proposal.proposer == *voter {
            return Err(GovernanceError::SelfVoteForbidden);
        }
        if proposal.voters.contains(voter) {
            return Err(GovernanceError::AlreadyVoted);
        }
        let weight = token.past_balance_of(voter, proposal.snapshot);
        if weight == 0 {
            return Err(GovernanceError::NoVotingPower);
        }

        let bucket = match support {
            VoteSupport::For => &mut proposal.tally.for_votes,
            VoteSupport::Against => &mut proposal.tally.against_votes,
            VoteSupport::Abstain => &mut proposal.tally.abstain_votes,
        };
        *bucket = bucket
            .checked_add(weight)
            .ok_or(GovernanceError::Overflow)?;
        proposal.voters.insert(*voter);

        self.events.push(GovernanceEvent::VoteCast {
            id: *id,
            voter: *voter,
            support,
            weight,
            reason,
            at: now,
        });
        debug!(%id, voter = %voter, weight, "vote cast");
        Ok(weight)
    }

    fn require_live(&self, registry: &Registry) -> Result<(), GovernanceError> {
        if registry.is_deleted(self.dao_id) {
            return Err(GovernanceError::Inactive);
        }
        Ok(())
    }

    fn snapshot_supply(&self, id: &ProposalId) -> Result<u128, GovernanceError> {
        self.proposals
            .get(id)
            .map(|p| p.supply_at_snapshot)
            .ok_or(GovernanceError::UnknownProposal(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daoforge_nullables::NullStore;
    use daoforge_timelock::{TimelockError, MIN_DELAY_FLOOR_SECS};
    use daoforge_types::{CallPayload, CallRevert, Role, TokenKind};
    use proptest::prelude::*;

    const DELAY: u64 = 100;
    const PERIOD: u64 = 1_000;

    fn addr(n: u8) -> Address {
        Address::new([n; 32])
    }

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    fn note(text: &str) -> Vec<Call> {
        vec![Call {
            target: addr(9),
            value: 0,
            payload: CallPayload::Note(text.to_string()),
        }]
    }

    struct AcceptAllSink;

    impl CallSink for AcceptAllSink {
        fn apply(
            &mut self,
            _caller: &Address,
            _call: &Call,
            _now: Timestamp,
        ) -> Result<(), CallRevert> {
            Ok(())
        }
    }

    struct Fixture {
        engine: ProposalEngine,
        token: VotingToken,
        timelock: Timelock,
        registry: Registry,
        dao_id: DaoId,
        admin: Address,
    }

    /// A live DAO with a fungible token: proposer holds 100, two voters hold
    /// 400 and 500. Quorum is 20% of the 1000 supply.
    fn fixture() -> Fixture {
        let admin = addr(1);
        let engine_addr = addr(40);

        let mut registry = Registry::new();
        let dao_id = registry
            .reserve(admin, "ipfs://dao", TokenKind::Fungible, ts(0))
            .unwrap();
        registry
            .finalize(dao_id, engine_addr, addr(41), addr(42), addr(43), ts(0))
            .unwrap();

        let mut token =
            VotingToken::new(addr(43), "Voice", "VOI", TokenKind::Fungible, 0, None, admin);
        token.mint(&admin, &addr(2), 100, ts(10)).unwrap();
        token.mint(&admin, &addr(3), 400, ts(10)).unwrap();
        token.mint(&admin, &addr(4), 500, ts(10)).unwrap();

        let mut timelock = Timelock::new(addr(41), admin, MIN_DELAY_FLOOR_SECS).unwrap();
        timelock
            .grant_role(&admin, Role::Proposer, engine_addr)
            .unwrap();
        timelock
            .grant_role(&admin, Role::Executor, engine_addr)
            .unwrap();
        timelock
            .grant_role(&admin, Role::Canceller, engine_addr)
            .unwrap();

        let engine = ProposalEngine::new(
            engine_addr,
            dao_id,
            GovernorParams {
                voting_delay_secs: DELAY,
                voting_period_secs: PERIOD,
                proposal_threshold: 50,
                quorum_percentage: 20,
            },
        )
        .unwrap();

        Fixture {
            engine,
            token,
            timelock,
            registry,
            dao_id,
            admin,
        }
    }

    fn propose(f: &mut Fixture, now: Timestamp) -> ProposalId {
        f.engine
            .propose(&addr(2), note("raise"), "ipfs://p", &f.token, &f.registry, now)
            .unwrap()
    }

    #[test]
    fn constructor_validates_params() {
        let params = GovernorParams {
            voting_delay_secs: 0,
            voting_period_secs: 100,
            proposal_threshold: 0,
            quorum_percentage: 100,
        };
        assert_eq!(
            ProposalEngine::new(addr(40), DaoId::new(1), params).unwrap_err(),
            GovernanceError::InvalidQuorumPercentage(100)
        );
    }

    #[test]
    fn propose_validation() {
        let mut f = fixture();
        let err = f
            .engine
            .propose(&addr(2), note("x"), "", &f.token, &f.registry, ts(100))
            .unwrap_err();
        assert_eq!(err, GovernanceError::InvalidMetadata);

        let err = f
            .engine
            .propose(&addr(2), vec![], "ipfs://p", &f.token, &f.registry, ts(100))
            .unwrap_err();
        assert_eq!(err, GovernanceError::EmptyProposal);

        // addr(5) holds nothing, threshold is 50.
        let err = f
            .engine
            .propose(&addr(5), note("x"), "ipfs://p", &f.token, &f.registry, ts(100))
            .unwrap_err();
        assert_eq!(
            err,
            GovernanceError::BelowProposalThreshold {
                required: 50,
                held: 0,
            }
        );
    }

    #[test]
    fn duplicate_proposal_is_rejected() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        let err = f
            .engine
            .propose(&addr(2), note("raise"), "ipfs://p", &f.token, &f.registry, ts(200))
            .unwrap_err();
        assert_eq!(err, GovernanceError::AlreadyExists(id));
    }

    #[test]
    fn deleted_dao_rejects_proposals_and_votes() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        f.registry.delete(&f.admin, f.dao_id, ts(150)).unwrap();

        let err = f
            .engine
            .propose(&addr(2), note("other"), "ipfs://p", &f.token, &f.registry, ts(200))
            .unwrap_err();
        assert_eq!(err, GovernanceError::Inactive);

        let err = f
            .engine
            .cast_vote(
                &addr(3),
                &id,
                VoteSupport::For,
                &f.token,
                &f.registry,
                ts(100 + DELAY),
            )
            .unwrap_err();
        assert_eq!(err, GovernanceError::Inactive);
    }

    #[test]
    fn voting_window_gates_votes() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        assert_eq!(
            f.engine.state(&id, ts(100)).unwrap(),
            ProposalState::Pending
        );

        // Before the delay elapses.
        let err = f
            .engine
            .cast_vote(&addr(3), &id, VoteSupport::For, &f.token, &f.registry, ts(150))
            .unwrap_err();
        assert_eq!(err, GovernanceError::VotingNotOpen);

        let open = ts(100 + DELAY);
        assert_eq!(f.engine.state(&id, open).unwrap(), ProposalState::Active);
        f.engine
            .cast_vote(&addr(3), &id, VoteSupport::For, &f.token, &f.registry, open)
            .unwrap();

        // After the window closes.
        let err = f
            .engine
            .cast_vote(
                &addr(4),
                &id,
                VoteSupport::For,
                &f.token,
                &f.registry,
                ts(100 + DELAY + PERIOD),
            )
            .unwrap_err();
        assert_eq!(err, GovernanceError::VotingNotOpen);
    }

    #[test]
    fn proposer_cannot_vote_on_own_proposal() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        let err = f
            .engine
            .cast_vote(
                &addr(2),
                &id,
                VoteSupport::For,
                &f.token,
                &f.registry,
                ts(100 + DELAY),
            )
            .unwrap_err();
        assert_eq!(err, GovernanceError::SelfVoteForbidden);
    }

    #[test]
    fn double_voting_never_double_counts() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        let open = ts(100 + DELAY);

        let weight = f
            .engine
            .cast_vote(&addr(3), &id, VoteSupport::For, &f.token, &f.registry, open)
            .unwrap();
        assert_eq!(weight, 400);

        let err = f
            .engine
            .cast_vote(&addr(3), &id, VoteSupport::Against, &f.token, &f.registry, open)
            .unwrap_err();
        assert_eq!(err, GovernanceError::AlreadyVoted);
        assert_eq!(f.engine.proposal(&id).unwrap().tally.for_votes, 400);
        assert_eq!(f.engine.proposal(&id).unwrap().tally.against_votes, 0);
    }

    #[test]
    fn weight_is_fixed_at_snapshot() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));

        // Minted after the snapshot: no weight on this proposal.
        f.token.mint(&f.admin, &addr(5), 900, ts(150)).unwrap();
        let err = f
            .engine
            .cast_vote(
                &addr(5),
                &id,
                VoteSupport::For,
                &f.token,
                &f.registry,
                ts(100 + DELAY),
            )
            .unwrap_err();
        assert_eq!(err, GovernanceError::NoVotingPower);

        // Pre-snapshot holders vote with their snapshot balance even after
        // later mints changed the live supply.
        let weight = f
            .engine
            .cast_vote(
                &addr(4),
                &id,
                VoteSupport::For,
                &f.token,
                &f.registry,
                ts(100 + DELAY),
            )
            .unwrap();
        assert_eq!(weight, 500);
    }

    #[test]
    fn outcome_resolution() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        let open = ts(100 + DELAY);
        let closed = ts(100 + DELAY + PERIOD);

        // Quorum is 200 (20% of 1000). 500 for vs 400 against.
        f.engine
            .cast_vote(&addr(4), &id, VoteSupport::For, &f.token, &f.registry, open)
            .unwrap();
        f.engine
            .cast_vote(&addr(3), &id, VoteSupport::Against, &f.token, &f.registry, open)
            .unwrap();
        assert_eq!(
            f.engine.state(&id, closed).unwrap(),
            ProposalState::Succeeded
        );

        // Abstain weight reaches quorum but never approves.
        let other = f
            .engine
            .propose(&addr(2), note("second"), "ipfs://p", &f.token, &f.registry, ts(100))
            .unwrap();
        f.engine
            .cast_vote(&addr(4), &other, VoteSupport::Abstain, &f.token, &f.registry, open)
            .unwrap();
        assert_eq!(
            f.engine.state(&other, closed).unwrap(),
            ProposalState::Defeated
        );
    }

    #[test]
    fn quorum_not_reached_defeats() {
        let mut f = fixture();
        // Quorum 20% of 1000 = 200; a lone 100-weight For vote falls short.
        f.token.mint(&f.admin, &addr(5), 100, ts(10)).unwrap();
        // Supply is now 1100, quorum 220.
        let id = propose(&mut f, ts(100));
        f.engine
            .cast_vote(
                &addr(5),
                &id,
                VoteSupport::For,
                &f.token,
                &f.registry,
                ts(100 + DELAY),
            )
            .unwrap();
        assert_eq!(
            f.engine.state(&id, ts(100 + DELAY + PERIOD)).unwrap(),
            ProposalState::Defeated
        );
    }

    #[test]
    fn full_lifecycle_through_delayed_execution() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        let open = ts(100 + DELAY);
        let closed = ts(100 + DELAY + PERIOD);

        f.engine
            .cast_vote(&addr(4), &id, VoteSupport::For, &f.token, &f.registry, open)
            .unwrap();

        // Cannot queue while voting is open.
        let err = f
            .engine
            .queue(&id, &mut f.timelock, &f.registry, open)
            .unwrap_err();
        assert_eq!(err, GovernanceError::ProposalNotSucceeded);

        f.engine
            .queue(&id, &mut f.timelock, &f.registry, closed)
            .unwrap();
        assert_eq!(f.engine.state(&id, closed).unwrap(), ProposalState::Queued);

        // Cannot execute before the executor's delay elapses.
        let mut sink = AcceptAllSink;
        let err = f
            .engine
            .execute(&id, &mut f.timelock, &mut sink, closed)
            .unwrap_err();
        assert!(matches!(
            err,
            GovernanceError::Timelock(TimelockError::NotReady { .. })
        ));

        let ready = closed.plus(MIN_DELAY_FLOOR_SECS);
        f.engine
            .execute(&id, &mut f.timelock, &mut sink, ready)
            .unwrap();
        assert_eq!(f.engine.state(&id, ready).unwrap(), ProposalState::Executed);

        // Executed proposals are immutable.
        let err = f
            .engine
            .execute(&id, &mut f.timelock, &mut sink, ready)
            .unwrap_err();
        assert_eq!(err, GovernanceError::AlreadyExecuted);
        let err = f
            .engine
            .cancel(&addr(2), &id, &mut f.timelock, ready)
            .unwrap_err();
        assert_eq!(err, GovernanceError::AlreadyExecuted);
    }

    #[test]
    fn execute_without_queueing_fails() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        let mut sink = AcceptAllSink;
        let err = f
            .engine
            .execute(&id, &mut f.timelock, &mut sink, ts(200_000))
            .unwrap_err();
        assert_eq!(err, GovernanceError::NotQueued);
    }

    #[test]
    fn only_proposer_cancels_and_queued_op_is_canceled_too() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        let open = ts(100 + DELAY);
        let closed = ts(100 + DELAY + PERIOD);
        f.engine
            .cast_vote(&addr(4), &id, VoteSupport::For, &f.token, &f.registry, open)
            .unwrap();
        let operation = f
            .engine
            .queue(&id, &mut f.timelock, &f.registry, closed)
            .unwrap();

        let err = f
            .engine
            .cancel(&addr(4), &id, &mut f.timelock, closed)
            .unwrap_err();
        assert_eq!(err, GovernanceError::OnlyProposer);

        f.engine
            .cancel(&addr(2), &id, &mut f.timelock, closed)
            .unwrap();
        assert_eq!(
            f.engine.state(&id, closed).unwrap(),
            ProposalState::Canceled
        );
        assert!(!f.timelock.is_ready(&operation, closed.plus(MIN_DELAY_FLOOR_SECS)));
    }

    #[test]
    fn persistence_round_trip() {
        let mut f = fixture();
        let id = propose(&mut f, ts(100));
        f.engine
            .cast_vote(
                &addr(4),
                &id,
                VoteSupport::For,
                &f.token,
                &f.registry,
                ts(100 + DELAY),
            )
            .unwrap();

        let store = NullStore::new();
        f.engine.save_to_store(&store).unwrap();
        let loaded = ProposalEngine::load_from_store(
            f.engine.address(),
            f.dao_id,
            *f.engine.params(),
            &store,
        )
        .unwrap();
        assert_eq!(loaded.proposal(&id), f.engine.proposal(&id));
    }

    proptest! {
        #[test]
        fn quorum_is_exact_floor(supply in 0u128..u128::MAX / 100, q in 1u8..100) {
            let engine = ProposalEngine::new(
                addr(40),
                DaoId::new(1),
                GovernorParams {
                    voting_delay_secs: 0,
                    voting_period_secs: 1,
                    proposal_threshold: 0,
                    quorum_percentage: q,
                },
            )
            .unwrap();
            prop_assert_eq!(engine.quorum(supply), supply * q as u128 / 100);
        }

        #[test]
        fn engine_construction_matches_quorum_bounds(q in 0u8..=255) {
            let result = ProposalEngine::new(
                addr(40),
                DaoId::new(1),
                GovernorParams {
                    voting_delay_secs: 0,
                    voting_period_secs: 1,
                    proposal_threshold: 0,
                    quorum_percentage: q,
                },
            );
            prop_assert_eq!(result.is_ok(), (1..100).contains(&q));
        }
    }
}
