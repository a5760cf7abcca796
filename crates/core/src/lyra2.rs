//! Memory-hard key derivation over a small in-memory matrix.
//!
//! The derivation runs in two phases over a matrix of `n_rows × n_cols`
//! 96-byte blocks. Setup fills the rows deterministically, each new row
//! mixed from the previous row and a revisited earlier row; Wandering then
//! revisits rows in a state-dependent order for `time_cost` passes. The
//! matrix is allocated fresh per call and dropped on return; nothing is
//! shared between invocations.

use crate::error::Error;
use crate::params::{BLOCK_WORDS, SAFE_BLOCK_BYTES, SAFE_BLOCK_WORDS};
use crate::sponge::Sponge;

/// Dense row-major block arena. Rows never overlap, so plain index
/// arithmetic over one flat buffer expresses every access pattern the
/// phases need, including the in-place row updates of Wandering.
struct MemoryMatrix {
    words: Vec<u64>,
    n_cols: usize,
}

impl MemoryMatrix {
    fn new(word_count: usize, n_cols: usize) -> Self {
        Self {
            words: vec![0u64; word_count],
            n_cols,
        }
    }

    /// Word offset of block `(row, col)`.
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        (row * self.n_cols + col) * BLOCK_WORDS
    }
}

/// Derive `out_len` bytes from `password` and `salt`.
///
/// Deterministic and pure: equal inputs always produce equal output, and no
/// state survives the call. `time_cost` and `n_cols` must be positive;
/// `n_rows` must be a power of two ≥ 2 (the Setup visitation schedule and
/// the Wandering row stepping are defined only for power-of-two row
/// counts). `out_len == 0` yields an empty result.
pub fn derive_key(
    out_len: usize,
    password: &[u8],
    salt: &[u8],
    time_cost: u64,
    n_rows: u64,
    n_cols: u64,
) -> Result<Vec<u8>, Error> {
    let mut out = vec![0u8; out_len];
    derive_key_into(&mut out, password, salt, time_cost, n_rows, n_cols)?;
    Ok(out)
}

/// [`derive_key`] writing into a caller-provided buffer, used by the header
/// chain to fill one of its two digest buffers in place.
pub(crate) fn derive_key_into(
    out: &mut [u8],
    password: &[u8],
    salt: &[u8],
    time_cost: u64,
    n_rows: u64,
    n_cols: u64,
) -> Result<(), Error> {
    if time_cost == 0 {
        return Err(Error::Parameter {
            name: "time_cost",
            reason: "must be positive",
        });
    }
    if n_cols == 0 {
        return Err(Error::Parameter {
            name: "n_cols",
            reason: "must be positive",
        });
    }
    if n_rows < 2 || !n_rows.is_power_of_two() {
        return Err(Error::Parameter {
            name: "n_rows",
            reason: "must be a power of two >= 2",
        });
    }
    let matrix_words = usize::try_from(n_rows)
        .ok()
        .zip(usize::try_from(n_cols).ok())
        .and_then(|(r, c)| r.checked_mul(c))
        .and_then(|cells| cells.checked_mul(BLOCK_WORDS))
        .ok_or(Error::Parameter {
            name: "n_rows",
            reason: "memory matrix size overflows",
        })?;

    let rows = n_rows as usize;
    let cols = n_cols as usize;

    let mut sponge = Sponge::new();
    absorb_input(&mut sponge, out.len(), password, salt, time_cost, n_rows, n_cols);

    let mut m = MemoryMatrix::new(matrix_words, cols);

    // Setup: rows 0 and 1, then the window-doubling visitation schedule.
    reduced_squeeze_row0(&mut sponge, &mut m);
    reduced_duplex_row1(&mut sponge, &mut m);

    let mut row = 2usize;
    let mut prev = 1usize;
    let mut row_star = 0usize;
    let mut step = 1usize;
    let mut window = 2usize;
    let mut gap = 1i64;
    while row < rows {
        reduced_duplex_row_setup(&mut sponge, &mut m, prev, row_star, row);
        row_star = (row_star + step) & (window - 1);
        prev = row;
        row += 1;
        if row_star == 0 {
            step = (window as i64 + gap) as usize;
            window *= 2;
            gap = -gap;
        }
    }

    // Wandering: row* is picked from the state, reduced as unsigned 64-bit.
    // The row stepping wraps modulo 2^64 first, which agrees with a plain
    // modulo for power-of-two row counts even when the step is -1.
    let mut row = 0usize;
    for tau in 1..=time_cost {
        let step: u64 = if tau % 2 == 0 {
            1u64.wrapping_neg()
        } else {
            n_rows / 2 - 1
        };
        loop {
            row_star = (sponge.state[0] % n_rows) as usize;
            reduced_duplex_row(&mut sponge, &mut m, prev, row_star, row);
            prev = row;
            row = ((row as u64).wrapping_add(step) % n_rows) as usize;
            if row == 0 {
                break;
            }
        }
    }

    // Finalization: re-absorb the first block of the last row* touched,
    // then squeeze the requested length.
    let star = m.index(row_star, 0);
    sponge.absorb_block(&m.words[star..star + BLOCK_WORDS]);
    sponge.squeeze(out);
    Ok(())
}

/// Pad `password ‖ salt ‖ parameters` with the 10*1 scheme and absorb it in
/// safe-block units from the fixed initial state.
fn absorb_input(
    sponge: &mut Sponge,
    out_len: usize,
    password: &[u8],
    salt: &[u8],
    time_cost: u64,
    n_rows: u64,
    n_cols: u64,
) {
    let n_blocks_input = (password.len() + salt.len() + 6 * 8) / SAFE_BLOCK_BYTES + 1;
    let mut padded = vec![0u8; n_blocks_input * SAFE_BLOCK_BYTES];

    let mut pos = 0usize;
    padded[pos..pos + password.len()].copy_from_slice(password);
    pos += password.len();
    padded[pos..pos + salt.len()].copy_from_slice(salt);
    pos += salt.len();
    for value in [
        out_len as u64,
        password.len() as u64,
        salt.len() as u64,
        time_cost,
        n_rows,
        n_cols,
    ] {
        padded[pos..pos + 8].copy_from_slice(&value.to_le_bytes());
        pos += 8;
    }
    padded[pos] = 0x80;
    // 10*1: the final bit lands on the last byte of the last safe block.
    let last = padded.len() - 1;
    padded[last] ^= 0x01;

    for block in padded.chunks_exact(SAFE_BLOCK_BYTES) {
        let mut words = [0u64; SAFE_BLOCK_WORDS];
        for (word, bytes) in words.iter_mut().zip(block.chunks_exact(8)) {
            // chunks_exact(8) guarantees the conversion.
            *word = u64::from_le_bytes(bytes.try_into().unwrap());
        }
        sponge.absorb_block_safe(&words);
    }
}

/// Fill row 0 from the sponge rate at descending column index, one reduced
/// transform between writes. The column order is reversed relative to the
/// squeeze sequence.
fn reduced_squeeze_row0(sponge: &mut Sponge, m: &mut MemoryMatrix) {
    for col in (0..m.n_cols).rev() {
        let out = m.index(0, col);
        m.words[out..out + BLOCK_WORDS].copy_from_slice(&sponge.state[..BLOCK_WORDS]);
        sponge.transform_reduced();
    }
}

/// Build row 1 by duplexing row 0: absorb each source column in ascending
/// order, write `source XOR state` at descending destination columns.
fn reduced_duplex_row1(sponge: &mut Sponge, m: &mut MemoryMatrix) {
    let n_cols = m.n_cols;
    for col in 0..n_cols {
        let src = m.index(0, col);
        for j in 0..BLOCK_WORDS {
            sponge.state[j] ^= m.words[src + j];
        }
        sponge.transform_reduced();
        let dst = m.index(1, n_cols - 1 - col);
        for j in 0..BLOCK_WORDS {
            m.words[dst + j] = m.words[src + j] ^ sponge.state[j];
        }
    }
}

/// Setup-phase duplexing: absorb the wordwise wrapping sum of the previous
/// row and row*, write the new row at descending columns, and feed the
/// one-word-rotated state back into row*.
fn reduced_duplex_row_setup(
    sponge: &mut Sponge,
    m: &mut MemoryMatrix,
    prev: usize,
    row_star: usize,
    row_out: usize,
) {
    let n_cols = m.n_cols;
    for col in 0..n_cols {
        let src = m.index(prev, col);
        let star = m.index(row_star, col);
        for j in 0..BLOCK_WORDS {
            sponge.state[j] ^= m.words[src + j].wrapping_add(m.words[star + j]);
        }
        sponge.transform_reduced();
        let dst = m.index(row_out, n_cols - 1 - col);
        for j in 0..BLOCK_WORDS {
            m.words[dst + j] = m.words[src + j] ^ sponge.state[j];
        }
        for j in 0..BLOCK_WORDS {
            m.words[star + j] ^= sponge.state[(j + BLOCK_WORDS - 1) % BLOCK_WORDS];
        }
    }
}

/// Wandering-phase duplexing: same absorption as Setup, but the output row
/// is updated in place at ascending columns and row* may alias it. The
/// output update happens before the row* update, which is observable when
/// the two rows coincide.
fn reduced_duplex_row(
    sponge: &mut Sponge,
    m: &mut MemoryMatrix,
    prev: usize,
    row_star: usize,
    row_out: usize,
) {
    for col in 0..m.n_cols {
        let src = m.index(prev, col);
        let star = m.index(row_star, col);
        let dst = m.index(row_out, col);
        for j in 0..BLOCK_WORDS {
            sponge.state[j] ^= m.words[src + j].wrapping_add(m.words[star + j]);
        }
        sponge.transform_reduced();
        for j in 0..BLOCK_WORDS {
            m.words[dst + j] ^= sponge.state[j];
        }
        for j in 0..BLOCK_WORDS {
            m.words[star + j] ^= sponge.state[(j + BLOCK_WORDS - 1) % BLOCK_WORDS];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squeeze_row0_fills_columns_in_descending_order() {
        let mut sponge = Sponge::new();
        sponge.absorb_block_safe(&[0xA5A5_A5A5_A5A5_A5A5u64; SAFE_BLOCK_WORDS]);
        let mut reference = sponge.clone();

        let mut m = MemoryMatrix::new(4 * 4 * BLOCK_WORDS, 4);
        reduced_squeeze_row0(&mut sponge, &mut m);

        // The first squeezed block lands in the last column, the last one in
        // column 0.
        for col in (0..4).rev() {
            let off = m.index(0, col);
            assert_eq!(&m.words[off..off + BLOCK_WORDS], &reference.state[..BLOCK_WORDS]);
            reference.transform_reduced();
        }
    }

    #[test]
    fn row1_is_row0_xor_state() {
        let mut sponge = Sponge::new();
        sponge.absorb_block_safe(&[7u64; SAFE_BLOCK_WORDS]);

        let mut m = MemoryMatrix::new(2 * 2 * BLOCK_WORDS, 2);
        reduced_squeeze_row0(&mut sponge, &mut m);

        let mut shadow = sponge.clone();
        reduced_duplex_row1(&mut sponge, &mut m);

        // Re-derive the expected first write: absorbing row 0 column 0 must
        // produce row 1's last column.
        let src = m.index(0, 0);
        for j in 0..BLOCK_WORDS {
            shadow.state[j] ^= m.words[src + j];
        }
        shadow.transform_reduced();
        let dst = m.index(1, 1);
        for j in 0..BLOCK_WORDS {
            assert_eq!(m.words[dst + j], m.words[src + j] ^ shadow.state[j]);
        }
    }

    #[test]
    fn derive_key_is_deterministic() {
        let a = derive_key(32, b"password", b"salt", 1, 4, 4).unwrap();
        let b = derive_key(32, b"password", b"salt", 1, 4, 4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn derive_key_zero_length_output() {
        let out = derive_key(0, b"password", b"salt", 1, 4, 4).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn derive_key_multi_block_squeeze() {
        // Two full squeeze blocks plus a partial one; blocks must differ.
        let out = derive_key(200, b"password", b"salt", 1, 4, 4).unwrap();
        assert_eq!(out.len(), 200);
        assert_ne!(out[..96], out[96..192]);
    }

    #[test]
    fn derive_key_inputs_and_parameters_matter() {
        let base = derive_key(32, b"password", b"salt", 1, 4, 4).unwrap();
        assert_ne!(base, derive_key(32, b"Password", b"salt", 1, 4, 4).unwrap());
        assert_ne!(base, derive_key(32, b"password", b"Salt", 1, 4, 4).unwrap());
        assert_ne!(base, derive_key(32, b"password", b"salt", 2, 4, 4).unwrap());
        assert_ne!(base, derive_key(32, b"password", b"salt", 1, 8, 4).unwrap());
        assert_ne!(base, derive_key(32, b"password", b"salt", 1, 4, 8).unwrap());
    }

    #[test]
    fn derive_key_even_time_cost_walks_rows_backwards() {
        // time_cost = 2 exercises the negative row step of even passes.
        let out = derive_key(32, b"wander", b"backwards", 2, 8, 4).unwrap();
        assert_eq!(out, derive_key(32, b"wander", b"backwards", 2, 8, 4).unwrap());
    }

    #[test]
    fn derive_key_rejects_bad_parameters() {
        assert!(matches!(
            derive_key(32, b"p", b"s", 0, 4, 4),
            Err(Error::Parameter { name: "time_cost", .. })
        ));
        assert!(matches!(
            derive_key(32, b"p", b"s", 1, 4, 0),
            Err(Error::Parameter { name: "n_cols", .. })
        ));
        for n_rows in [0u64, 1, 3, 6, 12] {
            assert!(matches!(
                derive_key(32, b"p", b"s", 1, n_rows, 4),
                Err(Error::Parameter { name: "n_rows", .. })
            ));
        }
        // The smallest accepted matrix still derives.
        assert!(derive_key(32, b"p", b"s", 1, 2, 1).is_ok());
    }

    #[test]
    fn padding_block_count_boundaries() {
        // 15 bytes of input fills exactly one safe block with the trailing
        // 0x80 on its final byte; one more byte rolls over to two blocks.
        // Both must derive, and differently.
        let a = derive_key(32, &[1u8; 7], &[2u8; 8], 1, 4, 4).unwrap();
        let b = derive_key(32, &[1u8; 7], &[2u8; 9], 1, 4, 4).unwrap();
        assert_ne!(a, b);
    }
}
