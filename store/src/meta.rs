//! Metadata storage trait.

use crate::StoreError;

/// Trait for small keyed metadata blobs (engine parameters, counters).
pub trait MetaStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}
