//! Blake2b hashing for identifiers and address derivation.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use daoforge_types::{Address, Call, CallPayload, DaoId, OpHash, ProposalId};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    finalize(hasher)
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    finalize(hasher)
}

/// Deterministic proposal id from the owning DAO, the call batch, and the
/// description. Identical inputs always produce the same id.
pub fn proposal_id(dao_id: DaoId, calls: &[Call], description: &str) -> ProposalId {
    let mut hasher = Blake2b256::new();
    hasher.update(b"daoforge.proposal");
    hasher.update(dao_id.as_u64().to_be_bytes());
    feed_calls(&mut hasher, calls);
    hasher.update((description.len() as u64).to_be_bytes());
    hasher.update(description.as_bytes());
    ProposalId::new(finalize(hasher))
}

/// Deterministic operation hash for the delayed executor.
pub fn operation_hash(calls: &[Call], predecessor: Option<&OpHash>, salt: &[u8; 32]) -> OpHash {
    let mut hasher = Blake2b256::new();
    hasher.update(b"daoforge.operation");
    feed_calls(&mut hasher, calls);
    match predecessor {
        Some(p) => {
            hasher.update([1u8]);
            hasher.update(p.as_bytes());
        }
        None => hasher.update([0u8]),
    }
    hasher.update(salt);
    OpHash::new(finalize(hasher))
}

/// Derive a fresh component address from a seed and a component label.
pub fn derive_address(seed: &[u8], label: &str) -> Address {
    let mut hasher = Blake2b256::new();
    hasher.update(b"daoforge.address");
    hasher.update(seed);
    hasher.update(label.as_bytes());
    Address::new(finalize(hasher))
}

/// Feed a call batch into the hasher with a fixed, length-prefixed layout.
fn feed_calls(hasher: &mut Blake2b256, calls: &[Call]) {
    hasher.update((calls.len() as u64).to_be_bytes());
    for call in calls {
        hasher.update(call.target.as_bytes());
        hasher.update(call.value.to_be_bytes());
        hasher.update([call.payload.discriminant()]);
        match &call.payload {
            CallPayload::WithdrawNative { to, amount } => {
                hasher.update(to.as_bytes());
                hasher.update(amount.to_be_bytes());
            }
            CallPayload::WithdrawAsset { asset, to, amount } => {
                hasher.update(asset.as_bytes());
                hasher.update(to.as_bytes());
                hasher.update(amount.to_be_bytes());
            }
            CallPayload::MintVotingPower { to, amount } => {
                hasher.update(to.as_bytes());
                hasher.update(amount.to_be_bytes());
            }
            CallPayload::Note(text) => {
                hasher.update((text.len() as u64).to_be_bytes());
                hasher.update(text.as_bytes());
            }
        }
    }
}

fn finalize(hasher: Blake2b256) -> [u8; 32] {
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
