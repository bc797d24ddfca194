//! crates/dash_io/src/hasher.rs
//!
//! SHA-256 digests for provenance.
//! - `sha256_hex` hashes raw artifact bytes exactly as received.
//! - `sha256_canonical` hashes any serializable value through canonical JSON,
//!   so two equal documents hash equally regardless of their source formatting.
//! Hex output is lowercase.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Lowercase hex SHA-256 of the canonical JSON form of `value`.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v = serde_json::to_value(value)?;
    let bytes = to_canonical_bytes(&v)?;
    Ok(sha256_hex(&bytes))
}
