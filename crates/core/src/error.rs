//! Caller-contract failures. Every error here is deterministic and
//! caller-correctable; there are no transient failure modes.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The header chain accepts exactly 80 bytes; anything else is rejected
    /// rather than truncated or padded.
    #[error("block header must be exactly 80 bytes, got {0}")]
    HeaderLength(usize),

    /// A derivation parameter is outside its accepted domain.
    #[error("invalid derivation parameter `{name}`: {reason}")]
    Parameter {
        name: &'static str,
        reason: &'static str,
    },
}
