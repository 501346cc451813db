//! Registry of provisioned DAOs.
//!
//! Records go through a two-phase lifecycle: `reserve` hands out an id with
//! null component references (the proposal engine needs its DAO id before its
//! own address exists), and `finalize` fills the references in exactly once.
//! Deletion is a one-way flag, never a physical removal.

pub mod error;
pub mod record;
pub mod registry;

pub use error::RegistryError;
pub use record::DaoRecord;
pub use registry::{Registry, RegistryEvent};
