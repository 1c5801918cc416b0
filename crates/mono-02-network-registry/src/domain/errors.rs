//! Network registry errors.

use std::io;

use shared_types::{ErrorKind, FetchError, LOCALNET_EVM_CHAIN_ID};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Name or chain-id not in the registry.
    #[error("unknown network '{0}' (known: Localnet, Sprintnet, Testnet, Mainnet)")]
    UnknownNetwork(String),

    /// Manifest download failed.
    #[error("manifest fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Manifest body is not valid JSON or misses a field.
    #[error("manifest schema error: {0}")]
    Schema(String),

    /// Manifest parsed but failed verification.
    #[error("invalid {network} manifest: {reason}")]
    InvalidManifest { network: String, reason: String },

    /// Localnet EVM chain-id on another network.
    #[error(
        "FATAL: {network} carries the reserved Localnet EVM chain-id {evm_chain_id}; \
         refusing to use it"
    )]
    LocalnetLeak { network: String, evm_chain_id: u64 },

    /// Two records share one EVM chain-id.
    #[error("EVM chain-id {evm_chain_id} is used by both {first} and {second}")]
    DuplicateEvmChainId {
        evm_chain_id: u64,
        first: String,
        second: String,
    },

    /// Manifest cache read failed.
    #[error("manifest cache error at {path}: {source}")]
    Cache {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownNetwork(_) => ErrorKind::NetworkUnknown,
            Self::Fetch(_) => ErrorKind::Fetch,
            Self::Schema(_) | Self::InvalidManifest { .. } | Self::DuplicateEvmChainId { .. } => {
                ErrorKind::Schema
            }
            Self::LocalnetLeak { .. } => ErrorKind::LocalnetLeak,
            Self::Cache { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn leak(network: impl Into<String>) -> Self {
        Self::LocalnetLeak {
            network: network.into(),
            evm_chain_id: LOCALNET_EVM_CHAIN_ID,
        }
    }
}
