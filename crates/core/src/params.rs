//! Fixed parameters of the sponge geometry and the header hash chain.

/// Words in the sponge state (16 × u64 = 128 bytes).
pub const STATE_WORDS: usize = 16;

/// Words per memory-matrix block, the absorb/squeeze granularity of the
/// memory-hard derivation.
pub const BLOCK_WORDS: usize = 12;

/// Bytes per memory-matrix block (96).
pub const BLOCK_BYTES: usize = BLOCK_WORDS * 8;

/// Words per safe block, used only while absorbing the padded input.
pub const SAFE_BLOCK_WORDS: usize = 8;

/// Bytes per safe block (64).
pub const SAFE_BLOCK_BYTES: usize = SAFE_BLOCK_WORDS * 8;

/// Serialized block header size in bytes.
pub const HEADER_BYTES: usize = 80;

/// Digest size of every chain stage and of the final output.
pub const DIGEST_BYTES: usize = 32;

/// Time cost of the derivation stage inside the header chain.
pub const CHAIN_TIME_COST: u64 = 1;

/// Memory-matrix rows used by the header chain.
pub const CHAIN_ROWS: u64 = 4;

/// Memory-matrix columns used by the header chain.
pub const CHAIN_COLS: u64 = 4;

/// Memory-matrix footprint of one header hash (4 × 4 × 96 = 1536 bytes).
pub const CHAIN_MATRIX_BYTES: usize = CHAIN_ROWS as usize * CHAIN_COLS as usize * BLOCK_BYTES;
