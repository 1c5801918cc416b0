//! # Genesis Handler
//!
//! Fetches the genesis document, checks its chain-id, verifies its SHA-256
//! and writes it into the node home.
//!
//! The document is treated as opaque bytes apart from the top-level
//! `chain_id`; the bytes that were hashed are the bytes that are written.

pub mod domain;
pub mod service;

pub use domain::{
    compute_digest, digest_bytes, normalize_digest, validate, validate_chain_id,
    verify_bytes_digest, verify_digest, GenesisError,
};
pub use service::{fetch, write};
