use crate::block::{Block, Digest};
use crate::constants::{DIFFICULTY_PREFIX_LEN, HASH_SIZE};
use crate::error::{ChainError, Result};
use crate::hash::{compute_hash, hash_with_nonce};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How much of a difficulty pattern a hash has to match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyMode {
    /// Only the first two bytes of the pattern (or the single byte of a
    /// one-byte pattern) are compared, whatever its length.
    #[default]
    Prefix,
    /// Every byte of the pattern is compared.
    Full,
}

/// Byte pattern the leading bytes of a mined hash must equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Difficulty {
    pattern: Vec<u8>,
    mode: DifficultyMode,
}

impl Difficulty {
    pub fn new(pattern: impl Into<Vec<u8>>) -> Result<Self> {
        Self::with_mode(pattern, DifficultyMode::Prefix)
    }

    /// A difficulty whose whole pattern is enforced.
    pub fn full(pattern: impl Into<Vec<u8>>) -> Result<Self> {
        Self::with_mode(pattern, DifficultyMode::Full)
    }

    pub fn with_mode(pattern: impl Into<Vec<u8>>, mode: DifficultyMode) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(ChainError::EmptyDifficulty);
        }
        if mode == DifficultyMode::Full && pattern.len() > HASH_SIZE {
            return Err(ChainError::DifficultyTooLong {
                len: pattern.len(),
                max: HASH_SIZE,
            });
        }
        Ok(Self { pattern, mode })
    }

    pub fn from_hex(encoded: &str, mode: DifficultyMode) -> Result<Self> {
        let pattern =
            hex::decode(encoded).map_err(|e| ChainError::InvalidDifficultyHex(e.to_string()))?;
        Self::with_mode(pattern, mode)
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn mode(&self) -> DifficultyMode {
        self.mode
    }

    /// Number of leading bytes actually compared against a hash.
    pub fn compared_len(&self) -> usize {
        match self.mode {
            DifficultyMode::Prefix => self.pattern.len().min(DIFFICULTY_PREFIX_LEN),
            DifficultyMode::Full => self.pattern.len(),
        }
    }

    pub fn is_met_by(&self, hash: &Digest) -> bool {
        let len = self.compared_len();
        hash[..len] == self.pattern[..len]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.pattern))
    }
}

/// Result of a nonce search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MineOutcome {
    Found {
        nonce: u64,
        hash: Digest,
        /// Candidate nonces up to and including the winning one.
        attempts: u64,
    },
    /// The budget or the nonce range ran out. The block is left as it was.
    Exhausted { attempts: u64 },
}

/// Mine the block by incrementing the nonce until its hash meets `difficulty`.
///
/// Loops until a match is found. Only fails if the whole `u64` nonce range is
/// used up, which is never expected in practice.
pub fn mine(block: &mut Block, difficulty: &Difficulty) -> Result<Digest> {
    match mine_bounded(block, difficulty, None) {
        MineOutcome::Found { hash, .. } => Ok(hash),
        MineOutcome::Exhausted { attempts } => Err(ChainError::NonceSpaceExhausted { attempts }),
    }
}

/// Sequential search trying at most `max_attempts` nonces (unbounded on `None`).
///
/// On success the block carries the winning nonce and hash. The nonce never
/// wraps: reaching `u64::MAX` ends the search as exhausted.
pub fn mine_bounded(
    block: &mut Block,
    difficulty: &Difficulty,
    max_attempts: Option<u64>,
) -> MineOutcome {
    let start = block.nonce;
    let mut attempts = 0u64;
    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            block.nonce = start;
            return MineOutcome::Exhausted { attempts };
        }
        let Some(next) = block.nonce.checked_add(1) else {
            block.nonce = start;
            return MineOutcome::Exhausted { attempts };
        };
        block.nonce = next;
        attempts += 1;

        let hash = compute_hash(block);
        if difficulty.is_met_by(&hash) {
            block.hash = Some(hash);
            debug!(
                nonce = next,
                attempts,
                hash = %hex::encode(&hash[..8]),
                "mined block"
            );
            return MineOutcome::Found {
                nonce: next,
                hash,
                attempts,
            };
        }
    }
}

/// Parallel variant of [`mine_bounded`].
///
/// Candidates are spread over the rayon pool but the lowest matching nonce
/// wins, so the result is identical to the sequential search.
pub fn mine_parallel(
    block: &mut Block,
    difficulty: &Difficulty,
    max_attempts: Option<u64>,
) -> MineOutcome {
    let start = block.nonce;
    let available = u64::MAX - start;
    let budget = max_attempts.map_or(available, |max| max.min(available));
    if budget == 0 {
        return MineOutcome::Exhausted { attempts: 0 };
    }

    let template: &Block = block;
    let found = (1..=budget).into_par_iter().find_first(|offset| {
        let hash = hash_with_nonce(template, start + offset);
        difficulty.is_met_by(&hash)
    });

    match found {
        Some(offset) => {
            let nonce = start + offset;
            let hash = hash_with_nonce(block, nonce);
            block.nonce = nonce;
            block.hash = Some(hash);
            debug!(
                nonce,
                attempts = offset,
                hash = %hex::encode(&hash[..8]),
                "mined block in parallel"
            );
            MineOutcome::Found {
                nonce,
                hash,
                attempts: offset,
            }
        }
        None => MineOutcome::Exhausted { attempts: budget },
    }
}
