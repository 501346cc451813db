//! Registry storage trait.

use crate::StoreError;
use daoforge_types::DaoId;

/// Trait for storing DAO records. Records are append-mostly: lifecycle flags
/// are updated in place but records are never physically removed.
pub trait RegistryStore {
    /// Store a DAO record under its id.
    fn put_dao(&self, id: DaoId, data: &[u8]) -> Result<(), StoreError>;

    /// Get a DAO record by id.
    fn get_dao(&self, id: DaoId) -> Result<Option<Vec<u8>>, StoreError>;

    /// List all stored DAO records.
    fn list_daos(&self) -> Result<Vec<(DaoId, Vec<u8>)>, StoreError>;
}
