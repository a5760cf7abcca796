//! # lyra2pow core algorithm
//!
//! A chained proof-of-work hash for 80-byte block headers: five standard
//! 256-bit digests around a sponge-based memory-hard key derivation over a
//! small in-memory matrix.
//!
//! ## Construction
//!
//! - **Chain**: a fixed seven-stage pipeline ping-ponging two 32-byte
//!   buffers, with the memory-hard derivation as stage 4 and the same
//!   digest deliberately invoked at stages 3 and 6.
//! - **Memory-hard core**: a duplex sponge over a 16×u64 state builds and
//!   then pseudo-randomly revisits a matrix of 96-byte blocks (1536 bytes
//!   at the chain's fixed parameters), making the derivation latency-bound
//!   on memory rather than on arithmetic.
//! - **Purity**: every call allocates its own scratch memory and touches no
//!   shared state, so concurrent hashing of independent headers is safe.
//!
//! ## Example
//!
//! ```rust
//! use lyra2pow_core::pow_hash;
//!
//! let header = [0u8; 80];
//! let digest = pow_hash(&header).unwrap();
//! assert_eq!(digest.len(), 32);
//! ```
//!
//! Hashing anything other than exactly 80 bytes is a contract violation and
//! returns [`Error::HeaderLength`] instead of truncating.

mod chain;
mod error;
mod ffi;
mod lyra2;
mod params;
mod sponge;

pub use chain::pow_hash;
pub use error::Error;
pub use lyra2::derive_key;
pub use params::*;
