//! Nullable store — thread-safe in-memory storage for testing.

use daoforge_store::{GovernanceStore, MetaStore, RegistryStore, StoreError};
use daoforge_types::{DaoId, ProposalId};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// An in-memory registry + governance + meta store for testing.
pub struct NullStore {
    daos: Mutex<BTreeMap<u64, Vec<u8>>>,
    proposals: Mutex<BTreeMap<[u8; 32], Vec<u8>>>,
    meta: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            daos: Mutex::new(BTreeMap::new()),
            proposals: Mutex::new(BTreeMap::new()),
            meta: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryStore for NullStore {
    fn put_dao(&self, id: DaoId, data: &[u8]) -> Result<(), StoreError> {
        self.daos.lock().unwrap().insert(id.as_u64(), data.to_vec());
        Ok(())
    }

    fn get_dao(&self, id: DaoId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.daos.lock().unwrap().get(&id.as_u64()).cloned())
    }

    fn list_daos(&self) -> Result<Vec<(DaoId, Vec<u8>)>, StoreError> {
        Ok(self
            .daos
            .lock()
            .unwrap()
            .iter()
            .map(|(id, data)| (DaoId::new(*id), data.clone()))
            .collect())
    }
}

impl GovernanceStore for NullStore {
    fn put_proposal(&self, id: &ProposalId, data: &[u8]) -> Result<(), StoreError> {
        self.proposals
            .lock()
            .unwrap()
            .insert(*id.as_bytes(), data.to_vec());
        Ok(())
    }

    fn get_proposal(&self, id: &ProposalId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.proposals.lock().unwrap().get(id.as_bytes()).cloned())
    }

    fn list_proposals(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError> {
        Ok(self
            .proposals
            .lock()
            .unwrap()
            .iter()
            .map(|(id, data)| (ProposalId::new(*id), data.clone()))
            .collect())
    }
}

impl MetaStore for NullStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }
}
