//! In-memory, append-only hash chain gated by proof of work.
//!
//! A [`Block`] is mined by [`pow::mine`] until the leading bytes of its
//! SHA-512 hash match a [`Difficulty`] pattern. A [`Chain`] links each new
//! block to its tip before mining it, and the [`validation`] functions check
//! self-hashes and links after the fact.

pub mod block;
pub mod chain;
pub mod config;
pub mod constants;
pub mod error;
pub mod hash;
pub mod pow;
pub mod validation;

pub use block::{Block, Digest};
pub use chain::Chain;
pub use config::{MiningConfig, MiningStrategy};
pub use error::{ChainError, Result};
pub use hash::compute_hash;
pub use pow::{Difficulty, DifficultyMode, MineOutcome};
pub use validation::{validate_block, validate_chain, validate_link};
