//! Genesis handler errors.

use std::io;

use shared_types::{ErrorKind, FetchError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("genesis download failed: {0}")]
    Fetch(#[from] FetchError),

    /// Not JSON, not an object, or no usable `chain_id`.
    #[error("genesis schema error: {0}")]
    Schema(String),

    #[error("FATAL: wrong genesis: expected chain-id '{expected}', got '{actual}'")]
    ChainIdMismatch { expected: String, actual: String },

    #[error("FATAL: genesis SHA-256 mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("genesis I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl GenesisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(_) => ErrorKind::Fetch,
            Self::Schema(_) => ErrorKind::Schema,
            Self::ChainIdMismatch { .. } => ErrorKind::ChainIdMismatch,
            Self::DigestMismatch { .. } => ErrorKind::DigestMismatch,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
