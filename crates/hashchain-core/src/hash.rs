//! Block hashing.
//!
//! The digest input is the concatenation of the raw payload, the nonce and
//! timestamp as 8-byte little-endian integers, and the raw previous hash, with
//! no length prefixes. Mining and validation both hash through here, so the
//! layout must not change.

use crate::block::{Block, Digest};
use crate::constants::{HASH_SIZE, NONCE_SIZE, TIMESTAMP_SIZE};
use sha2::{Digest as _, Sha512};

pub fn hash_input(block: &Block) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        block.data.len() + NONCE_SIZE + TIMESTAMP_SIZE + block.previous_hash.len(),
    );
    bytes.extend_from_slice(&block.data);
    bytes.extend_from_slice(&block.nonce.to_le_bytes());
    bytes.extend_from_slice(&block.timestamp.to_le_bytes());
    bytes.extend_from_slice(&block.previous_hash);
    bytes
}

/// SHA-512 over [`hash_input`].
pub fn compute_hash(block: &Block) -> Digest {
    hash_with_nonce(block, block.nonce)
}

/// Hash `block` as if its nonce were `nonce`, without touching the block.
pub(crate) fn hash_with_nonce(block: &Block, nonce: u64) -> Digest {
    let mut hasher = Sha512::new();
    hasher.update(&block.data);
    hasher.update(nonce.to_le_bytes());
    hasher.update(block.timestamp.to_le_bytes());
    hasher.update(&block.previous_hash);
    let digest = hasher.finalize();
    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&digest[..]);
    out
}
