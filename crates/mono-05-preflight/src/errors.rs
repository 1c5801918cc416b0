//! Preflight failures.

use shared_types::{ErrorKind, NODE_BINARY_NAME};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreflightError {
    #[error(
        "dirty data directory at {home}/data: leftover database state from a previous run ({})",
        .entries.join(", ")
    )]
    DirtyData { home: String, entries: Vec<String> },

    #[error("{home} is already initialized for chain-id '{actual}', expected '{expected}'")]
    ChainIdOnDiskMismatch {
        home: String,
        expected: String,
        actual: String,
    },
}

impl PreflightError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DirtyData { .. } => ErrorKind::DirtyData,
            Self::ChainIdOnDiskMismatch { .. } => ErrorKind::ChainIdOnDiskMismatch,
        }
    }

    /// What the operator should run to recover.
    pub fn remediation(&self) -> String {
        match self {
            Self::DirtyData { home, .. } => format!(
                "reset the node state with `{NODE_BINARY_NAME} comet unsafe-reset-all --home {home}` \
                 and rerun the join"
            ),
            Self::ChainIdOnDiskMismatch { home, .. } => format!(
                "use a different --home, or run `{NODE_BINARY_NAME} comet unsafe-reset-all --home {home}` \
                 and remove {home}/config/genesis.json before rejoining"
            ),
        }
    }
}
