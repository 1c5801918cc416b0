//! SHA-256 content digests.

use std::fs::File;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::domain::errors::GenesisError;

/// Lowercase hex SHA-256 of `bytes`.
pub fn digest_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Stream the file at `path` through SHA-256.
pub fn compute_digest(path: &Path) -> Result<String, GenesisError> {
    let mut file = File::open(path).map_err(|e| GenesisError::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| GenesisError::io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Canonical form of an operator-supplied digest.
pub fn normalize_digest(expected: &str) -> String {
    let trimmed = expected.trim();
    let bare = trimmed
        .strip_prefix("sha256:")
        .or_else(|| trimmed.strip_prefix("SHA256:"))
        .unwrap_or(trimmed);
    bare.trim().to_ascii_lowercase()
}

pub fn verify_bytes_digest(bytes: &[u8], expected: &str) -> Result<String, GenesisError> {
    check(digest_bytes(bytes), expected)
}

pub fn verify_digest(path: &Path, expected: &str) -> Result<String, GenesisError> {
    check(compute_digest(path)?, expected)
}

fn check(actual: String, expected: &str) -> Result<String, GenesisError> {
    let expected = normalize_digest(expected);
    if actual != expected {
        return Err(GenesisError::DigestMismatch { expected, actual });
    }
    Ok(actual)
}
