use anyhow::{Context, Result};
use clap::Parser;
use hashchain_core::{
    constants::DEFAULT_DIFFICULTY, Block, Chain, Difficulty, DifficultyMode, MiningConfig,
    MiningStrategy,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "hashchain")]
#[command(about = "Mine a chain of random blocks and validate it after every append")]
struct Cli {
    /// Number of blocks to append after genesis
    #[arg(long, default_value_t = 200)]
    blocks: usize,

    /// Size in bytes of each random payload
    #[arg(long, default_value_t = 2256)]
    payload_size: usize,

    /// Seed for payload generation (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty pattern as hex
    #[arg(long, default_value_t = hex::encode(DEFAULT_DIFFICULTY))]
    difficulty: String,

    /// Enforce the whole difficulty pattern instead of its first two bytes
    #[arg(long)]
    full_difficulty: bool,

    /// Give up on a block after this many nonces
    #[arg(long)]
    max_attempts: Option<u64>,

    /// Search nonces on all cores
    #[arg(long)]
    parallel: bool,

    /// Print blocks as JSON lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn difficulty(&self) -> Result<Difficulty> {
        let mode = if self.full_difficulty {
            DifficultyMode::Full
        } else {
            DifficultyMode::Prefix
        };
        Difficulty::from_hex(&self.difficulty, mode)
            .with_context(|| format!("invalid --difficulty {:?}", self.difficulty))
    }

    fn mining_config(&self) -> MiningConfig {
        let strategy = if self.parallel {
            MiningStrategy::Parallel
        } else {
            MiningStrategy::Sequential
        };
        MiningConfig {
            max_attempts: self.max_attempts,
            strategy,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    height: usize,
    block: &'a Block,
    chain_valid: bool,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let difficulty = cli.difficulty()?;
    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, difficulty = %difficulty, blocks = cli.blocks, "starting");

    let mut rng = StdRng::seed_from_u64(seed);
    let genesis = Block::new(vec![0x00; 5]);
    let mut chain = Chain::with_config(difficulty, genesis, cli.mining_config())
        .context("mining genesis block")?;

    for _ in 0..cli.blocks {
        let payload: Vec<u8> = (0..cli.payload_size).map(|_| rng.gen()).collect();
        let height = chain.len();
        chain
            .add(Block::new(payload))
            .with_context(|| format!("mining block {height}"))?;

        let chain_valid = chain.is_valid();
        let block = &chain[height];
        if cli.json {
            let report = Report {
                height,
                block,
                chain_valid,
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{block}");
            println!("chain valid: {chain_valid}");
        }
    }
    Ok(())
}
