//! Sponge engine: a 16-word state mixed by a fixed quarter-round schedule.
//!
//! The state is absorbed into by XOR and read out little-endian. Two
//! transform strengths exist: the full 12-round transform used for input
//! absorption and finalization, and the single-round reduced transform used
//! while the memory matrix is built and revisited. The reduced strength is
//! part of the construction, not an optimization knob.

use crate::params::{BLOCK_BYTES, BLOCK_WORDS, SAFE_BLOCK_WORDS, STATE_WORDS};

/// Rounds in the full-strength transform.
pub const FULL_ROUNDS: usize = 12;

/// Initialization constants loaded into the capacity half of the state.
const SPONGE_IV: [u64; 8] = [
    0x6A09_E667_F3BC_C908,
    0xBB67_AE85_84CA_A73B,
    0x3C6E_F372_FE94_F82B,
    0xA54F_F53A_5F1D_36F1,
    0x510E_527F_ADE6_82D1,
    0x9B05_688C_2B3E_6C1F,
    0x1F83_D9AB_FB41_BD6B,
    0x5BE0_CD19_137E_2179,
];

/// Sponge state: 16 words, the first 12 forming the rate and the rest the
/// capacity. Word arithmetic wraps modulo 2^64.
#[derive(Clone)]
pub struct Sponge {
    pub(crate) state: [u64; STATE_WORDS],
}

impl Sponge {
    /// Fresh state: rate words zero, capacity words set to the fixed IV.
    pub fn new() -> Self {
        let mut state = [0u64; STATE_WORDS];
        state[STATE_WORDS / 2..].copy_from_slice(&SPONGE_IV);
        Self { state }
    }

    /// One round: the four column mixes followed by the four diagonal mixes.
    pub fn round(&mut self) {
        let v = &mut self.state;
        quarter_round(v, 0, 4, 8, 12);
        quarter_round(v, 1, 5, 9, 13);
        quarter_round(v, 2, 6, 10, 14);
        quarter_round(v, 3, 7, 11, 15);
        quarter_round(v, 0, 5, 10, 15);
        quarter_round(v, 1, 6, 11, 12);
        quarter_round(v, 2, 7, 8, 13);
        quarter_round(v, 3, 4, 9, 14);
    }

    /// Full-strength transform: exactly [`FULL_ROUNDS`] consecutive rounds.
    pub fn transform_full(&mut self) {
        for _ in 0..FULL_ROUNDS {
            self.round();
        }
    }

    /// Reduced transform: a single round.
    pub fn transform_reduced(&mut self) {
        self.round();
    }

    /// XOR the first [`BLOCK_WORDS`] words of `block` into the rate, then
    /// apply the full transform. Used when re-absorbing a matrix row during
    /// finalization.
    pub fn absorb_block(&mut self, block: &[u64]) {
        for (s, w) in self.state.iter_mut().zip(&block[..BLOCK_WORDS]) {
            *s ^= *w;
        }
        self.transform_full();
    }

    /// XOR an 8-word safe block into the state, then apply the full
    /// transform. Input absorption only.
    pub fn absorb_block_safe(&mut self, block: &[u64; SAFE_BLOCK_WORDS]) {
        for (s, w) in self.state.iter_mut().zip(block) {
            *s ^= *w;
        }
        self.transform_full();
    }

    /// Fill `out` with squeezed bytes: the 12 rate words are written
    /// little-endian per full block with a full transform between blocks;
    /// a trailing partial block is taken from a dump of the whole 16-word
    /// state, with no transform after the last write.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        let mut blocks = out.chunks_exact_mut(BLOCK_BYTES);
        for block in &mut blocks {
            for (dst, word) in block.chunks_exact_mut(8).zip(&self.state[..BLOCK_WORDS]) {
                dst.copy_from_slice(&word.to_le_bytes());
            }
            self.transform_full();
        }

        let rest = blocks.into_remainder();
        if !rest.is_empty() {
            let mut dump = [0u8; STATE_WORDS * 8];
            for (dst, word) in dump.chunks_exact_mut(8).zip(&self.state) {
                dst.copy_from_slice(&word.to_le_bytes());
            }
            rest.copy_from_slice(&dump[..rest.len()]);
        }
    }
}

/// Mix four state words in place. All additions wrap, all rotations are
/// bitwise rotate-right.
#[inline(always)]
fn quarter_round(v: &mut [u64; STATE_WORDS], a: usize, b: usize, c: usize, d: usize) {
    v[a] = v[a].wrapping_add(v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}
