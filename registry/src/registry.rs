//! The registry engine.

use crate::error::RegistryError;
use crate::record::DaoRecord;
use daoforge_store::{MetaStore, RegistryStore, StoreError};
use daoforge_types::{Address, DaoId, Timestamp, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

const NEXT_ID_META_KEY: &str = "registry.next_dao_id";

/// Emitted on record lifecycle transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    Reserved {
        id: DaoId,
        creator: Address,
        at: Timestamp,
    },
    Finalized {
        id: DaoId,
        at: Timestamp,
    },
    VisibilityChanged {
        id: DaoId,
        hidden: bool,
        at: Timestamp,
    },
    Deleted {
        id: DaoId,
        at: Timestamp,
    },
}

/// The catalogue of provisioned DAOs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Registry {
    daos: BTreeMap<u64, DaoRecord>,
    next_id: u64,
    events: Vec<RegistryEvent>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            daos: BTreeMap::new(),
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Reserve an id for a DAO being provisioned. The record starts with
    /// null component references.
    pub fn reserve(
        &mut self,
        creator: Address,
        metadata_uri: impl Into<String>,
        token_kind: TokenKind,
        now: Timestamp,
    ) -> Result<DaoId, RegistryError> {
        let metadata_uri = metadata_uri.into();
        if metadata_uri.is_empty() {
            return Err(RegistryError::EmptyMetadata);
        }
        let id = DaoId::new(self.next_id);
        self.next_id += 1;
        self.daos.insert(
            id.as_u64(),
            DaoRecord {
                id,
                creator,
                metadata_uri,
                token_kind,
                governor: None,
                timelock: None,
                treasury: None,
                token: None,
                created_at: now,
                hidden: false,
                deleted: false,
            },
        );
        self.events.push(RegistryEvent::Reserved {
            id,
            creator,
            at: now,
        });
        debug!(%id, creator = %creator, "dao reserved");
        Ok(id)
    }

    /// Fill in the component references for a reserved id. Succeeds exactly
    /// once per id.
    pub fn finalize(
        &mut self,
        id: DaoId,
        governor: Address,
        timelock: Address,
        treasury: Address,
        token: Address,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        if [governor, timelock, treasury, token]
            .iter()
            .any(Address::is_zero)
        {
            return Err(RegistryError::ZeroComponentAddress);
        }
        let record = self
            .daos
            .get_mut(&id.as_u64())
            .ok_or(RegistryError::UnknownDao(id))?;
        if record.is_finalized() {
            return Err(RegistryError::AlreadyFinalized(id));
        }
        record.governor = Some(governor);
        record.timelock = Some(timelock);
        record.treasury = Some(treasury);
        record.token = Some(token);
        self.events.push(RegistryEvent::Finalized { id, at: now });
        info!(%id, "dao finalized");
        Ok(())
    }

    /// Drop a reservation that never finalized. This is the abort path for a
    /// provisioning run that failed partway; finalized records can never be
    /// removed.
    pub fn abort_reservation(&mut self, id: DaoId) -> Result<(), RegistryError> {
        let record = self
            .daos
            .get(&id.as_u64())
            .ok_or(RegistryError::UnknownDao(id))?;
        if record.is_finalized() {
            return Err(RegistryError::AlreadyFinalized(id));
        }
        self.daos.remove(&id.as_u64());
        debug!(%id, "reservation aborted");
        Ok(())
    }

    /// Set the visibility flag. Creator only; rejected once deleted.
    pub fn set_hidden(
        &mut self,
        caller: &Address,
        id: DaoId,
        hidden: bool,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        let record = self.creator_record(caller, id)?;
        record.hidden = hidden;
        self.events
            .push(RegistryEvent::VisibilityChanged { id, hidden, at: now });
        Ok(())
    }

    /// Mark a DAO deleted. Creator only, one-way, and forces `hidden`.
    pub fn delete(
        &mut self,
        caller: &Address,
        id: DaoId,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        let record = self.creator_record(caller, id)?;
        record.deleted = true;
        record.hidden = true;
        self.events.push(RegistryEvent::Deleted { id, at: now });
        info!(%id, "dao deleted");
        Ok(())
    }

    /// Liveness check consulted before proposal-engine actions. Unknown ids
    /// count as deleted.
    pub fn is_deleted(&self, id: DaoId) -> bool {
        self.daos
            .get(&id.as_u64())
            .map(|record| record.deleted)
            .unwrap_or(true)
    }

    pub fn get_dao(&self, id: DaoId) -> Option<&DaoRecord> {
        self.daos.get(&id.as_u64())
    }

    pub fn get_daos_by_creator(&self, creator: &Address) -> Vec<&DaoRecord> {
        self.daos
            .values()
            .filter(|record| record.creator == *creator)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.daos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daos.is_empty()
    }

    /// Drain accumulated events.
    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Persist all records and the id counter.
    pub fn save_to_store(
        &self,
        daos: &dyn RegistryStore,
        meta: &dyn MetaStore,
    ) -> Result<(), StoreError> {
        for record in self.daos.values() {
            let data = bincode::serialize(record)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            daos.put_dao(record.id, &data)?;
        }
        meta.put_meta(NEXT_ID_META_KEY, &self.next_id.to_be_bytes())?;
        Ok(())
    }

    /// Rebuild a registry from storage.
    pub fn load_from_store(
        daos: &dyn RegistryStore,
        meta: &dyn MetaStore,
    ) -> Result<Self, StoreError> {
        let mut registry = Self::new();
        for (id, data) in daos.list_daos()? {
            let record: DaoRecord = bincode::deserialize(&data)
                .map_err(|e| StoreError::Corruption(format!("{}: {}", id, e)))?;
            registry.daos.insert(id.as_u64(), record);
        }
        if let Some(raw) = meta.get_meta(NEXT_ID_META_KEY)? {
            let bytes: [u8; 8] = raw
                .try_into()
                .map_err(|_| StoreError::Corruption(NEXT_ID_META_KEY.to_string()))?;
            registry.next_id = u64::from_be_bytes(bytes);
        } else {
            registry.next_id = registry.daos.keys().max().map(|id| id + 1).unwrap_or(1);
        }
        Ok(registry)
    }

    fn creator_record(
        &mut self,
        caller: &Address,
        id: DaoId,
    ) -> Result<&mut DaoRecord, RegistryError> {
        let record = self
            .daos
            .get_mut(&id.as_u64())
            .ok_or(RegistryError::UnknownDao(id))?;
        if record.creator != *caller {
            return Err(RegistryError::OnlyCreator);
        }
        if record.deleted {
            return Err(RegistryError::AlreadyDeleted(id));
        }
        Ok(record)
    }
}
