use crate::block::{Block, Digest};
use crate::error::{ChainError, Result};
use crate::pow::{self, Difficulty, MineOutcome};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiningStrategy {
    #[default]
    Sequential,
    Parallel,
}

/// How a chain mines the blocks handed to it.
///
/// The default searches sequentially with no attempt limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub max_attempts: Option<u64>,
    pub strategy: MiningStrategy,
}

impl MiningConfig {
    pub fn bounded(max_attempts: u64) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: MiningStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Mine `block` under this configuration.
    pub fn mine(&self, block: &mut Block, difficulty: &Difficulty) -> Result<Digest> {
        let outcome = match self.strategy {
            MiningStrategy::Sequential => pow::mine_bounded(block, difficulty, self.max_attempts),
            MiningStrategy::Parallel => pow::mine_parallel(block, difficulty, self.max_attempts),
        };
        match outcome {
            MineOutcome::Found { hash, .. } => Ok(hash),
            MineOutcome::Exhausted { attempts } if self.max_attempts == Some(attempts) => {
                Err(ChainError::BudgetExhausted { attempts })
            }
            MineOutcome::Exhausted { attempts } => Err(ChainError::NonceSpaceExhausted { attempts }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_sequential() {
        let config = MiningConfig::default();
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.strategy, MiningStrategy::Sequential);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: MiningConfig = serde_json::from_str(r#"{"strategy":"parallel"}"#).unwrap();
        assert_eq!(config, MiningConfig::default().with_strategy(MiningStrategy::Parallel));

        let config: MiningConfig = serde_json::from_str(r#"{"max_attempts":10}"#).unwrap();
        assert_eq!(config, MiningConfig::bounded(10));
    }

    #[test]
    fn budget_exhaustion_is_an_error() {
        let difficulty = Difficulty::full(vec![0x00; 8]).unwrap();
        let mut block = Block::with_timestamp(vec![1], 1);
        for strategy in [MiningStrategy::Sequential, MiningStrategy::Parallel] {
            let config = MiningConfig::bounded(50).with_strategy(strategy);
            let err = config.mine(&mut block, &difficulty).unwrap_err();
            assert_eq!(err, ChainError::BudgetExhausted { attempts: 50 });
            assert!(!block.is_mined());
        }
    }

    #[test]
    fn mine_assigns_hash() {
        let difficulty = Difficulty::new(vec![0x00]).unwrap();
        let mut block = Block::with_timestamp(vec![1], 1);
        let hash = MiningConfig::default().mine(&mut block, &difficulty).unwrap();
        assert_eq!(block.hash(), Some(&hash));
        assert_eq!(hash[0], 0x00);
    }
}
