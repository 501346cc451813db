use daoforge_types::{Address, DaoId, Timestamp, TokenKind};
use serde::{Deserialize, Serialize};

/// One provisioned DAO.
///
/// Component references are `None` between `reserve` and `finalize`; once
/// set they never change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoRecord {
    pub id: DaoId,
    pub creator: Address,
    pub metadata_uri: String,
    pub token_kind: TokenKind,
    pub governor: Option<Address>,
    pub timelock: Option<Address>,
    pub treasury: Option<Address>,
    pub token: Option<Address>,
    pub created_at: Timestamp,
    /// Creator-controlled visibility flag. Forced true by deletion.
    pub hidden: bool,
    /// One-way deletion latch. A deleted DAO rejects all liveness-gated
    /// actions forever.
    pub deleted: bool,
}

impl DaoRecord {
    pub fn is_finalized(&self) -> bool {
        self.governor.is_some()
    }
}
