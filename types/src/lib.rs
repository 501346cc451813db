//! Fundamental types for the daoforge DAO provisioning system.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, identifiers, timestamps, calls, capability roles,
//! and the provisioning configuration.

pub mod address;
pub mod call;
pub mod config;
pub mod dao;
pub mod hash;
pub mod roles;
pub mod time;

pub use address::Address;
pub use call::{Call, CallPayload, CallRevert, CallSink};
pub use config::{ConfigError, ControllerPolicy, ProvisionConfig};
pub use dao::{DaoId, TokenKind};
pub use hash::{OpHash, ProposalId};
pub use roles::{Role, RoleTable};
pub use time::Timestamp;
