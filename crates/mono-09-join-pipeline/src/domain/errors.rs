//! Join errors and remediation text.

use std::io;

use mono_01_peer_registry::PeersError;
use mono_02_network_registry::RegistryError;
use mono_03_genesis::GenesisError;
use mono_04_toml_patcher::PatchError;
use mono_05_preflight::PreflightError;
use shared_types::{ErrorKind, NODE_BINARY_NAME};
use thiserror::Error;

use crate::domain::step::JoinResult;

/// Node binary lookup or `init` failure.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("node binary '{}' not found (searched: {})", NODE_BINARY_NAME, .searched.join(", "))]
    BinaryNotFound { searched: Vec<String> },

    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },

    #[error("{binary} init exited with {status}: {output}")]
    Failed {
        binary: String,
        status: String,
        output: String,
    },
}

#[derive(Debug, Error)]
pub enum JoinError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),

    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error(transparent)]
    Init(#[from] InitError),

    #[error("peer registry rejected: {0}")]
    Peers(#[from] PeersError),

    #[error("bootstrap sync requested but no bootstrap or persistent peers are available")]
    NoBootstrapPeers,

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl JoinError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(e) => e.kind(),
            Self::Genesis(e) => e.kind(),
            Self::Preflight(e) => e.kind(),
            Self::Init(_) => ErrorKind::NodeBinary,
            Self::Peers(e) => e.kind(),
            Self::NoBootstrapPeers => ErrorKind::ValidatePeer,
            Self::Patch(e) => e.kind(),
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Actionable next step for the operator.
    pub fn remediation(&self) -> String {
        match self {
            Self::Preflight(e) => e.remediation(),
            Self::Registry(RegistryError::UnknownNetwork(_)) => {
                "choose one of Localnet, Sprintnet, Testnet, Mainnet".to_string()
            }
            Self::Registry(RegistryError::LocalnetLeak { .. }) => {
                "do not proceed: the canonical manifest is wrong; report it to the network operators".to_string()
            }
            Self::Registry(_) => {
                "check connectivity to the canonical manifest repository or set MONO_CANONICAL_BASE".to_string()
            }
            Self::Genesis(GenesisError::ChainIdMismatch { .. }) => {
                "do not proceed: this genesis belongs to another chain; use the genesis published for the selected network".to_string()
            }
            Self::Genesis(GenesisError::DigestMismatch { .. }) => {
                "do not proceed: the downloaded genesis does not match the published digest; re-download it and check --genesis-sha256".to_string()
            }
            Self::Genesis(GenesisError::Fetch(_)) => {
                "check connectivity to the genesis URL or pass --genesis-url".to_string()
            }
            Self::Genesis(_) => "the genesis document is malformed; obtain it from the network operators".to_string(),
            Self::Init(_) => format!(
                "install {NODE_BINARY_NAME} into <home>/bin, /usr/local/bin or PATH, or pass --node-binary"
            ),
            Self::Peers(_) => {
                "the peer registry is malformed; report it or rerun with --no-peer-registry".to_string()
            }
            Self::NoBootstrapPeers => {
                "publish bootstrap peers for this network or rerun with --sync-mode default".to_string()
            }
            Self::Patch(PatchError::KeyMissing { .. }) => format!(
                "the config template is incomplete; regenerate it with `{NODE_BINARY_NAME} init` in a fresh home"
            ),
            Self::Patch(_) | Self::Io { .. } => {
                "check that the node home is writable by the current user".to_string()
            }
        }
    }
}

/// A failed join: the partial report and the error that stopped it.
#[derive(Debug, Error)]
#[error("join failed: {error}")]
pub struct JoinFailure {
    pub result: JoinResult,
    pub error: JoinError,
}

impl JoinFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn remediation(&self) -> String {
        self.error.remediation()
    }
}
