//! Content hashing.
//!
//! Primary keys in the history store are SHA-256 digests of the submitted
//! text. This is the only place they are computed.

use sha2::{Digest, Sha256};

/// SHA-256 of the UTF-8 bytes of `text`, rendered as 64 lowercase hex
/// characters. Deterministic; identical input always yields identical
/// output.
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
