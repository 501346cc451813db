use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreasuryError {
    #[error("only the treasury controller may withdraw")]
    OnlyController,

    #[error("recipient address must not be zero")]
    ZeroRecipient,

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("arithmetic overflow")]
    Overflow,
}
