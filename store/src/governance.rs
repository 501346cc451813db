//! Governance storage trait.

use crate::StoreError;
use daoforge_types::ProposalId;

/// Trait for storing proposal state.
pub trait GovernanceStore {
    /// Store a proposal.
    fn put_proposal(&self, id: &ProposalId, data: &[u8]) -> Result<(), StoreError>;

    /// Get a proposal by id.
    fn get_proposal(&self, id: &ProposalId) -> Result<Option<Vec<u8>>, StoreError>;

    /// List all stored proposals.
    fn list_proposals(&self) -> Result<Vec<(ProposalId, Vec<u8>)>, StoreError>;
}
