//! C FFI binding for external miners and verifiers.

use core::slice;

use crate::chain::pow_hash;
use crate::params::DIGEST_BYTES;

/// Compute the proof-of-work digest of an 80-byte header.
///
/// - `header`: pointer to `header_len` input bytes
/// - `output`: pointer to a 32-byte buffer for the digest
///
/// Returns 0 on success, -1 on a null pointer or a header that is not
/// exactly 80 bytes. `output` is untouched on failure.
#[unsafe(no_mangle)]
pub extern "C" fn lyra2pow_hash(header: *const u8, header_len: usize, output: *mut u8) -> i32 {
    if header.is_null() || output.is_null() {
        return -1;
    }

    let header = unsafe { slice::from_raw_parts(header, header_len) };
    match pow_hash(header) {
        Ok(digest) => {
            let out = unsafe { slice::from_raw_parts_mut(output, DIGEST_BYTES) };
            out.copy_from_slice(&digest);
            0
        }
        Err(_) => -1,
    }
}
