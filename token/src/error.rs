use daoforge_types::Role;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("caller does not hold the {} role", .0.name())]
    NotAuthorized(Role),

    #[error("recipient address must not be zero")]
    ZeroRecipient,

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("operation does not match the token kind")]
    WrongTokenKind,

    #[error("mint would exceed max supply: requested total {requested}, max {max}")]
    MaxSupplyExceeded { requested: u128, max: u128 },

    #[error("arithmetic overflow")]
    Overflow,
}
