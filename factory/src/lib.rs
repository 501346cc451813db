//! DAO provisioning.
//!
//! One call takes a [`daoforge_types::ProvisionConfig`] and produces a fully
//! wired DAO: voting token, delayed executor, proposal engine, and treasury,
//! with every capability handed to its final holder and none left with the
//! deployer. Provisioning is all-or-nothing; a failure partway leaves no
//! trace in the registry.

pub mod dao;
pub mod error;
pub mod factory;

pub use dao::Dao;
pub use error::ProvisionError;
pub use factory::{DaoFactory, FactoryEvent};
