pub mod digest;
pub mod document;
pub mod errors;

pub use digest::{compute_digest, digest_bytes, normalize_digest, verify_bytes_digest, verify_digest};
pub use document::{validate, validate_chain_id};
pub use errors::GenesisError;
