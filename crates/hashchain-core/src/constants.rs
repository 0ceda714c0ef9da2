pub const HASH_SIZE: usize = 64;
pub const NONCE_SIZE: usize = 8;
pub const TIMESTAMP_SIZE: usize = 8;
/// Previous-hash value carried by a genesis block.
pub const GENESIS_PREVIOUS_HASH: [u8; 1] = [0x00];
/// Leading bytes compared by the default difficulty check.
pub const DIFFICULTY_PREFIX_LEN: usize = 2;
pub const DEFAULT_DIFFICULTY: [u8; 2] = [0x00, 0x00];
