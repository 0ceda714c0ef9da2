//! Integrity checks over mined blocks.
//!
//! All checks return `bool`: a failed check means tampering or corruption and
//! is an expected outcome, not an error.

use crate::block::Block;
use crate::hash::compute_hash;
use tracing::warn;

/// True iff the block is mined and its stored hash matches a fresh hash.
pub fn validate_block(block: &Block) -> bool {
    match &block.hash {
        Some(stored) => *stored == compute_hash(block),
        None => false,
    }
}

/// True iff `predecessor` is self-consistent and `block` points at its hash.
///
/// Does not look further back than `predecessor`.
pub fn validate_link(block: &Block, predecessor: &Block) -> bool {
    let Some(predecessor_hash) = &predecessor.hash else {
        return false;
    };
    validate_block(predecessor) && block.previous_hash == predecessor_hash.as_slice()
}

/// Check every consecutive pair of `blocks`.
///
/// Empty and single-block sequences have no pairs and are trivially valid;
/// the first block's own hash is not checked here.
pub fn validate_chain(blocks: &[Block]) -> bool {
    blocks.windows(2).enumerate().all(|(i, pair)| {
        let (predecessor, block) = (&pair[0], &pair[1]);
        let position = i + 1;
        if !validate_block(block) {
            warn!(position, "block hash does not match its contents");
            return false;
        }
        if !validate_link(block, predecessor) {
            warn!(position, "block is not linked to a valid predecessor");
            return false;
        }
        true
    })
}
