//! lyra2pow
//!
//! A chained memory-hard proof-of-work hash for 80-byte block headers.
//!
//! # Overview
//!
//! Block validation and mining both funnel through one function: serialize
//! a header to 80 bytes, hash it, and compare the 32-byte digest against
//! the chain's difficulty target (the comparison and its byte order stay
//! with the caller).
//!
//! # Example
//!
//! ```rust
//! use lyra2pow::pow_hash;
//!
//! let header = [0u8; 80];
//! let digest = pow_hash(&header).expect("header is exactly 80 bytes");
//! assert_eq!(digest.len(), 32);
//! ```

// Re-export the core algorithm
pub use lyra2pow_core as algorithm;

// Convenience re-exports
pub use algorithm::{derive_key, pow_hash, Error};
