//! Abstract storage traits for daoforge.
//!
//! Storage backends implement these traits; the engines depend only on the
//! traits and serialize their own records to bytes. The in-memory backend
//! used by the tests lives in the nullables crate.

pub mod error;
pub mod governance;
pub mod meta;
pub mod registry;

pub use error::StoreError;
pub use governance::GovernanceStore;
pub use meta::MetaStore;
pub use registry::RegistryStore;
