//! The provisioning orchestrator.

use crate::dao::Dao;
use crate::error::ProvisionError;
use daoforge_crypto::hash::derive_address;
use daoforge_governance::{GovernorParams, ProposalEngine};
use daoforge_registry::Registry;
use daoforge_timelock::Timelock;
use daoforge_token::VotingToken;
use daoforge_treasury::Treasury;
use daoforge_types::{Address, ControllerPolicy, DaoId, ProvisionConfig, Role, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Emitted when a DAO finishes provisioning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryEvent {
    DaoProvisioned {
        id: DaoId,
        creator: Address,
        governor: Address,
        timelock: Address,
        treasury: Address,
        token: Address,
        at: Timestamp,
    },
}

/// Provisions DAOs and owns the shared registry.
///
/// The factory acts as the temporary administrator of every component it
/// deploys; by the time `provision` returns, all of those rights have been
/// handed to their final holders and the factory keeps nothing.
#[derive(Clone, Debug)]
pub struct DaoFactory {
    address: Address,
    registry: Registry,
    events: Vec<FactoryEvent>,
}

impl DaoFactory {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            registry: Registry::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Drain accumulated events.
    pub fn take_events(&mut self) -> Vec<FactoryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Provision one DAO from `config`, returning the wired bundle.
    ///
    /// All-or-nothing: validation happens before any state is touched, and a
    /// failure in any later step restores the registry to its prior state.
    pub fn provision(
        &mut self,
        creator: Address,
        config: ProvisionConfig,
        now: Timestamp,
    ) -> Result<Dao, ProvisionError> {
        config.validate()?;
        let params = GovernorParams {
            voting_delay_secs: config.voting_delay_secs,
            voting_period_secs: config.voting_period_secs,
            proposal_threshold: config.proposal_threshold,
            quorum_percentage: config.quorum_percentage,
        };
        params.validate()?;

        let checkpoint = self.registry.clone();
        match self.build(creator, &config, params, now) {
            Ok(dao) => Ok(dao),
            Err(e) => {
                self.registry = checkpoint;
                Err(e)
            }
        }
    }

    fn build(
        &mut self,
        creator: Address,
        config: &ProvisionConfig,
        params: GovernorParams,
        now: Timestamp,
    ) -> Result<Dao, ProvisionError> {
        let id = self.registry.reserve(
            creator,
            config.metadata_uri.clone(),
            config.token_kind,
            now,
        )?;
        info!(%id, creator = %creator, "provisioning dao");

        let seed = [
            self.address.as_bytes().as_slice(),
            &id.as_u64().to_be_bytes(),
        ]
        .concat();
        let governor_addr = derive_address(&seed, "governor");
        let timelock_addr = derive_address(&seed, "timelock");
        let treasury_addr = derive_address(&seed, "treasury");
        let token_addr = derive_address(&seed, "token");

        let mut timelock = Timelock::new(timelock_addr, self.address, config.timelock_delay_secs)?;
        let mut token = VotingToken::new(
            token_addr,
            config.token_name.clone(),
            config.token_symbol.clone(),
            config.token_kind,
            config.max_supply,
            config.base_uri.clone(),
            self.address,
        );
        let engine = ProposalEngine::new(governor_addr, id, params)?;
        let controller_addr = match config.controller {
            ControllerPolicy::Timelock => timelock_addr,
            ControllerPolicy::Engine => governor_addr,
        };
        let treasury = Treasury::new(treasury_addr, controller_addr);

        if config.initial_supply > 0 {
            token.mint(&self.address, &creator, config.initial_supply, now)?;
            debug!(%id, amount = config.initial_supply, "initial supply minted to creator");
        }

        self.registry
            .finalize(id, governor_addr, timelock_addr, treasury_addr, token_addr, now)?;

        self.configure_roles(&mut token, &mut timelock, governor_addr, config.open_execution)?;

        let dao = Dao {
            id,
            token,
            timelock,
            engine,
            treasury,
            controller: config.controller,
        };
        Self::verify_handoff(&dao, &self.address, &creator)?;

        self.events.push(FactoryEvent::DaoProvisioned {
            id,
            creator,
            governor: governor_addr,
            timelock: timelock_addr,
            treasury: treasury_addr,
            token: token_addr,
            at: now,
        });
        info!(%id, governor = %governor_addr, "dao provisioned");
        Ok(dao)
    }

    /// Wire every capability to its final holder.
    ///
    /// Order matters: every grant happens before any revocation. Revoking
    /// the deployer's admin rights first would leave components with no
    /// admin at all, or with the deployer keeping latent control.
    fn configure_roles(
        &self,
        token: &mut VotingToken,
        timelock: &mut Timelock,
        engine_addr: Address,
        open_execution: bool,
    ) -> Result<(), ProvisionError> {
        let deployer = self.address;
        let timelock_addr = timelock.address();

        timelock.grant_role(&deployer, Role::Proposer, engine_addr)?;
        debug!(subject = %engine_addr, "granted proposer on executor");
        timelock.grant_role(&deployer, Role::Canceller, engine_addr)?;
        debug!(subject = %engine_addr, "granted canceller on executor");
        if open_execution {
            timelock.grant_open_role(&deployer, Role::Executor)?;
            debug!("opened executor role to the public");
        } else {
            timelock.grant_role(&deployer, Role::Executor, engine_addr)?;
            debug!(subject = %engine_addr, "granted executor on executor");
        }
        token.grant_role(&deployer, Role::Minter, timelock_addr)?;
        debug!(subject = %timelock_addr, "granted minter on token");
        token.grant_role(&deployer, Role::Admin, timelock_addr)?;
        debug!(subject = %timelock_addr, "granted admin on token");
        timelock.grant_role(&deployer, Role::Admin, timelock_addr)?;
        debug!(subject = %timelock_addr, "executor now administers itself");

        token.renounce_role(&deployer, Role::Minter);
        token.renounce_role(&deployer, Role::Admin);
        timelock.renounce_role(&deployer, Role::Admin);
        debug!("deployer renounced all roles");
        Ok(())
    }

    /// Confirm the capability handoff left the DAO in its resting shape.
    /// Any miss here is fatal to the whole provisioning.
    fn verify_handoff(
        dao: &Dao,
        deployer: &Address,
        creator: &Address,
    ) -> Result<(), ProvisionError> {
        const ROLES: [Role; 6] = [
            Role::Admin,
            Role::Minter,
            Role::Proposer,
            Role::Executor,
            Role::Canceller,
            Role::Controller,
        ];
        for role in ROLES {
            if dao.token.roles().holders(role).contains(deployer)
                || dao.timelock.role_holders(role).contains(deployer)
            {
                return Err(ProvisionError::HandoffIncomplete(
                    "deployer still holds a role",
                ));
            }
        }
        if dao.token.roles().holders(Role::Admin).contains(creator)
            || dao.timelock.role_holders(Role::Admin).contains(creator)
        {
            return Err(ProvisionError::HandoffIncomplete(
                "creator holds an administrative role",
            ));
        }
        let timelock_addr = dao.timelock.address();
        if !dao.token.roles().is_sole_holder(Role::Admin, &timelock_addr) {
            return Err(ProvisionError::HandoffIncomplete(
                "executor is not the token's sole admin",
            ));
        }
        if !dao.timelock.is_sole_admin(&timelock_addr) {
            return Err(ProvisionError::HandoffIncomplete(
                "executor is not its own sole admin",
            ));
        }
        if dao.timelock.role_holders(Role::Proposer) != vec![dao.engine.address()] {
            return Err(ProvisionError::HandoffIncomplete(
                "engine is not the sole proposer",
            ));
        }
        Ok(())
    }
}
