use daoforge_types::DaoId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("metadata URI must not be empty")]
    EmptyMetadata,

    #[error("unknown DAO {0}")]
    UnknownDao(DaoId),

    #[error("{0} is already finalized")]
    AlreadyFinalized(DaoId),

    #[error("component address must not be zero")]
    ZeroComponentAddress,

    #[error("only the DAO's creator may do this")]
    OnlyCreator,

    #[error("{0} is already deleted")]
    AlreadyDeleted(DaoId),
}
