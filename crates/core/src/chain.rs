//! Fixed seven-stage header hash chain.
//!
//! Five standard 256-bit digests wrap one memory-hard derivation. Every
//! stage fully overwrites one of two 32-byte buffers before the next stage
//! reads it, so no stage ever observes a mix of old and new data. The stage
//! order, the buffer ping-pong, and the derivation parameters are
//! consensus-critical and must not change.

use blake2::Blake2s256;
use digest::consts::U32;
use digest::{Digest, OutputSizeUser};
use groestl::Groestl256;
use jh::Jh256;
use sha3::Keccak256;
use skein::Skein512;

use crate::error::Error;
use crate::lyra2::derive_key_into;
use crate::params::{CHAIN_COLS, CHAIN_ROWS, CHAIN_TIME_COST, DIGEST_BYTES, HEADER_BYTES};

/// Hash an 80-byte serialized block header into its 32-byte proof-of-work
/// digest.
///
/// Deterministic and pure; safe to call concurrently on independent
/// headers. How the digest is compared against a difficulty target,
/// including its byte order, is the caller's convention.
pub fn pow_hash(header: &[u8]) -> Result<[u8; DIGEST_BYTES], Error> {
    if header.len() != HEADER_BYTES {
        return Err(Error::HeaderLength(header.len()));
    }

    let mut buf_a = [0u8; DIGEST_BYTES];
    let mut buf_b = [0u8; DIGEST_BYTES];

    hash_stage::<Blake2s256>(header, &mut buf_a);
    hash_stage::<Keccak256>(&buf_a, &mut buf_b);
    hash_stage::<Groestl256>(&buf_b, &mut buf_a);
    derive_key_into(&mut buf_b, &buf_a, &buf_a, CHAIN_TIME_COST, CHAIN_ROWS, CHAIN_COLS)?;
    hash_stage::<Skein512<U32>>(&buf_b, &mut buf_a);
    // The same digest as stage 3, by definition of the chain.
    hash_stage::<Groestl256>(&buf_a, &mut buf_b);
    hash_stage::<Jh256>(&buf_b, &mut buf_a);

    Ok(buf_a)
}

/// One standard-hash stage: a fresh hasher state, the whole input fed once,
/// the 256-bit digest written over `out`.
fn hash_stage<D>(input: &[u8], out: &mut [u8; DIGEST_BYTES])
where
    D: Digest + OutputSizeUser<OutputSize = U32>,
{
    let mut hasher = D::new();
    hasher.update(input);
    out.copy_from_slice(&hasher.finalize());
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn stage_adapter_matches_published_vectors() {
        let mut out = [0u8; DIGEST_BYTES];

        hash_stage::<Keccak256>(b"", &mut out);
        assert_eq!(
            out,
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );

        hash_stage::<Blake2s256>(b"", &mut out);
        assert_eq!(
            out,
            hex!("69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9")
        );
    }

    #[test]
    fn rejects_wrong_header_length() {
        assert_eq!(pow_hash(&[0u8; 79]), Err(Error::HeaderLength(79)));
        assert_eq!(pow_hash(&[0u8; 81]), Err(Error::HeaderLength(81)));
        assert_eq!(pow_hash(&[]), Err(Error::HeaderLength(0)));
    }

    #[test]
    fn accepts_exact_header_length() {
        let digest = pow_hash(&[0u8; HEADER_BYTES]).unwrap();
        assert_eq!(digest.len(), DIGEST_BYTES);
    }
}
