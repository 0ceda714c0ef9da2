use crate::block::Block;
use crate::config::MiningConfig;
use crate::constants::GENESIS_PREVIOUS_HASH;
use crate::error::Result;
use crate::pow::Difficulty;
use crate::validation::{validate_block, validate_chain};
use std::ops::Index;
use std::slice;
use tracing::info;

/// Append-only, hash-linked sequence of mined blocks.
///
/// Blocks only enter through [`Chain::new`] (genesis) and [`Chain::add`],
/// both of which mine the block first. There is no removal or reordering.
#[derive(Clone, Debug)]
pub struct Chain {
    difficulty: Difficulty,
    config: MiningConfig,
    blocks: Vec<Block>,
}

impl Chain {
    /// Mine `genesis` and start a chain with it.
    pub fn new(difficulty: Difficulty, genesis: Block) -> Result<Self> {
        Self::with_config(difficulty, genesis, MiningConfig::default())
    }

    pub fn with_config(
        difficulty: Difficulty,
        mut genesis: Block,
        config: MiningConfig,
    ) -> Result<Self> {
        genesis.previous_hash = GENESIS_PREVIOUS_HASH.to_vec();
        config.mine(&mut genesis, &difficulty)?;
        info!(
            difficulty = %difficulty,
            nonce = genesis.nonce,
            "genesis block mined"
        );
        Ok(Self {
            difficulty,
            config,
            blocks: vec![genesis],
        })
    }

    /// Link `block` to the current tip, mine it and append it.
    ///
    /// If mining fails the chain is left untouched.
    pub fn add(&mut self, mut block: Block) -> Result<&Block> {
        if let Some(tip) = self.blocks.last().and_then(|tip| tip.hash) {
            block.previous_hash = tip.to_vec();
        }
        self.config.mine(&mut block, &self.difficulty)?;

        let height = self.blocks.len();
        info!(height, nonce = block.nonce, "block appended");
        self.blocks.push(block);
        Ok(&self.blocks[height])
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Genesis self-hash plus every consecutive link.
    pub fn is_valid(&self) -> bool {
        self.blocks.first().is_some_and(validate_block) && validate_chain(&self.blocks)
    }
}

impl Index<usize> for Chain {
    type Output = Block;

    fn index(&self, index: usize) -> &Block {
        &self.blocks[index]
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
