use hashchain_core::{
    compute_hash, validate_block, validate_chain, validate_link, Block, Chain, ChainError,
    Difficulty, DifficultyMode, MiningConfig, MiningStrategy,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_payload(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

fn build_chain(seed: u64, blocks: usize, difficulty: Difficulty) -> anyhow::Result<Chain> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut chain = Chain::new(difficulty, Block::new(vec![0x00; 5]))?;
    for _ in 0..blocks {
        let len = rng.gen_range(1..256);
        chain.add(Block::new(random_payload(&mut rng, len)))?;
    }
    Ok(chain)
}

/// Re-create a block with its payload altered, keeping every other field.
fn with_corrupted_data(block: &Block) -> anyhow::Result<Block> {
    let mut value = serde_json::to_value(block)?;
    let mut data = block.data().to_vec();
    data[0] ^= 0xFF;
    value["data"] = serde_json::Value::String(hex::encode(data));
    Ok(serde_json::from_value(value)?)
}

#[test]
fn test_seeded_chain_is_valid() -> anyhow::Result<()> {
    let chain = build_chain(42, 20, Difficulty::new(vec![0x00])?)?;
    assert_eq!(chain.len(), 21);
    assert!(validate_chain(chain.blocks()));
    assert!(chain.is_valid());
    for block in &chain {
        assert!(validate_block(block));
        assert_eq!(block.hash().map(|h| h[0]), Some(0x00));
    }
    Ok(())
}

#[test]
fn test_every_link_points_at_predecessor() -> anyhow::Result<()> {
    let chain = build_chain(7, 10, Difficulty::new(vec![0x00])?)?;
    for pair in chain.blocks().windows(2) {
        assert!(validate_link(&pair[1], &pair[0]));
        assert_eq!(Some(pair[1].previous_hash()), pair[0].hash().map(|h| &h[..]));
    }
    Ok(())
}

#[test]
fn test_two_byte_difficulty_scenario() -> anyhow::Result<()> {
    let difficulty = Difficulty::new(vec![0x00, 0x00])?;
    let mut chain = Chain::new(difficulty, Block::new(vec![0x00; 5]))?;
    assert_eq!(chain.len(), 1);
    assert!(validate_block(&chain[0]));

    chain.add(Block::new(vec![0x01, 0x02]))?;
    chain.add(Block::new(vec![0x03, 0x04]))?;
    chain.add(Block::new(vec![0x05, 0x06]))?;
    assert_eq!(chain.len(), 4);
    assert!(validate_chain(chain.blocks()));

    let mut blocks = chain.blocks().to_vec();
    blocks[2] = with_corrupted_data(&blocks[2])?;
    assert!(!validate_block(&blocks[2]));
    assert!(!validate_chain(&blocks));
    Ok(())
}

#[test]
fn test_spliced_foreign_block() -> anyhow::Result<()> {
    let chain = build_chain(1, 5, Difficulty::new(vec![0x00])?)?;
    let foreign = build_chain(2, 5, Difficulty::new(vec![0x00])?)?;

    let mut blocks = chain.blocks().to_vec();
    blocks[3] = foreign[3].clone();
    assert!(validate_block(&blocks[3]));
    assert!(!validate_chain(&blocks));
    Ok(())
}

#[test]
fn test_json_round_trip_preserves_validity() -> anyhow::Result<()> {
    let chain = build_chain(3, 4, Difficulty::new(vec![0x00])?)?;
    let json = serde_json::to_string(chain.blocks())?;
    let restored: Vec<Block> = serde_json::from_str(&json)?;
    assert_eq!(restored.as_slice(), chain.blocks());
    assert!(validate_chain(&restored));
    Ok(())
}

#[test]
fn test_parallel_and_sequential_chains_agree() -> anyhow::Result<()> {
    let difficulty = Difficulty::new(vec![0x00])?;
    let timestamp = 1_700_000_000_000_000_000;
    let payloads: Vec<Vec<u8>> = (0..4u8).map(|i| vec![i; 16]).collect();

    let parallel_config = MiningConfig::default().with_strategy(MiningStrategy::Parallel);
    let mut sequential = Chain::new(difficulty.clone(), Block::with_timestamp(vec![0], timestamp))?;
    let mut parallel = Chain::with_config(
        difficulty,
        Block::with_timestamp(vec![0], timestamp),
        parallel_config,
    )?;
    for payload in payloads {
        sequential.add(Block::with_timestamp(payload.clone(), timestamp))?;
        parallel.add(Block::with_timestamp(payload, timestamp))?;
    }
    assert_eq!(sequential.blocks(), parallel.blocks());
    Ok(())
}

#[test]
fn test_full_difficulty_mode() -> anyhow::Result<()> {
    let difficulty = Difficulty::from_hex("0000", DifficultyMode::Full)?;
    let chain = Chain::new(difficulty, Block::new(vec![1, 2, 3]))?;
    let hash = chain[0].hash().copied().unwrap_or([0xFF; 64]);
    assert_eq!(&hash[..2], &[0x00, 0x00]);
    assert_eq!(hash, compute_hash(&chain[0]));
    Ok(())
}

#[test]
fn test_bounded_mining_reports_budget() -> anyhow::Result<()> {
    let difficulty = Difficulty::full(vec![0x00; 16])?;
    let result = Chain::with_config(difficulty, Block::new(vec![1]), MiningConfig::bounded(1_000));
    assert_eq!(
        result.map(|chain| chain.len()),
        Err(ChainError::BudgetExhausted { attempts: 1_000 })
    );
    Ok(())
}
