//! Hashing for the daoforge system.
//!
//! - **Blake2b-256** for all deterministic identifiers
//! - Proposal ids from `(dao id, calls, description)`
//! - Operation hashes from `(calls, predecessor, salt)`
//! - Component address derivation at provisioning time

pub mod hash;

pub use hash::{blake2b_256, blake2b_256_multi, derive_address, operation_hash, proposal_id};
