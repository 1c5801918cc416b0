//! Domain errors for the peer registry.

use shared_types::{ErrorKind, FetchError};
use thiserror::Error;

/// A single peer failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerError {
    #[error("peer '{0}' has no '@' separating node-id and address")]
    MissingSeparator(String),

    #[error("node-id '{0}' is not 40 hex characters")]
    InvalidNodeId(String),

    #[error("host '{0}' is not a DNS name or IP literal")]
    InvalidHost(String),

    #[error("port '{0}' is not in 1..=65535")]
    InvalidPort(String),

    #[error("peer entry must be a string or an object with node_id and address")]
    UnsupportedShape,
}

impl PeerError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingSeparator(_) | Self::UnsupportedShape => "peer",
            Self::InvalidNodeId(_) => "node_id",
            Self::InvalidHost(_) => "host",
            Self::InvalidPort(_) => "port",
        }
    }
}

/// Errors from ingesting a peer registry document.
#[derive(Debug, Error)]
pub enum PeersError {
    /// Malformed JSON.
    #[error("peer registry is not valid JSON: {0}")]
    Parse(String),

    /// Required field missing or wrong type.
    #[error("peer registry schema error: {0}")]
    Schema(String),

    /// An element of a peer list failed validation.
    #[error("{list}[{index}]: invalid {field}: {source}")]
    Validate {
        list: &'static str,
        index: usize,
        field: &'static str,
        #[source]
        source: PeerError,
    },

    /// Could not download the registry.
    #[error("peer registry fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

impl PeersError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) | Self::Schema(_) => ErrorKind::Schema,
            Self::Validate { .. } => ErrorKind::ValidatePeer,
            Self::Fetch(_) => ErrorKind::Fetch,
        }
    }
}
