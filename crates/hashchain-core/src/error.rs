use thiserror::Error;

/// Errors surfaced by chain construction and mining.
///
/// Validation never produces one of these: a tampered or broken chain is
/// reported as `false` by the functions in [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("difficulty pattern must not be empty")]
    EmptyDifficulty,

    #[error("difficulty pattern is not valid hex: {0}")]
    InvalidDifficultyHex(String),

    #[error("difficulty pattern of {len} bytes exceeds the {max}-byte digest")]
    DifficultyTooLong { len: usize, max: usize },

    #[error("nonce space exhausted after {attempts} attempts")]
    NonceSpaceExhausted { attempts: u64 },

    #[error("mining budget of {attempts} attempts exhausted")]
    BudgetExhausted { attempts: u64 },
}

pub type Result<T> = std::result::Result<T, ChainError>;
