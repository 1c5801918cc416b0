//! # Error Kinds
//!
//! Every subsystem error maps onto one of these kinds. The driver uses the
//! kind to choose remediation text and to decide whether a failure belongs
//! to the FATAL class.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of failure classes surfaced by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Network name not in the registry.
    NetworkUnknown,
    /// HTTP transport failure or non-2xx status.
    Fetch,
    /// JSON malformed or a required field missing.
    Schema,
    /// A peer failed node-id, host or port validation.
    ValidatePeer,
    /// Genesis chain-id disagrees with the expected network.
    ChainIdMismatch,
    /// SHA-256 of the genesis bytes disagrees with the expected digest.
    DigestMismatch,
    /// Leftover database directories under `<home>/data`.
    DirtyData,
    /// The home already holds a genesis for a different chain.
    ChainIdOnDiskMismatch,
    /// The patcher could not find the key in the expected section.
    TomlKeyMissing,
    /// A non-Localnet manifest carries the Localnet EVM chain-id.
    LocalnetLeak,
    /// Local filesystem failure.
    Io,
    /// Node binary missing or its `init` invocation failed.
    NodeBinary,
}

impl ErrorKind {
    /// Stable snake_case spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkUnknown => "network_unknown",
            Self::Fetch => "fetch",
            Self::Schema => "schema",
            Self::ValidatePeer => "validate_peer",
            Self::ChainIdMismatch => "chain_id_mismatch",
            Self::DigestMismatch => "digest_mismatch",
            Self::DirtyData => "dirty_data",
            Self::ChainIdOnDiskMismatch => "chain_id_on_disk_mismatch",
            Self::TomlKeyMissing => "toml_key_missing",
            Self::LocalnetLeak => "localnet_leak",
            Self::Io => "io",
            Self::NodeBinary => "node_binary",
        }
    }

    /// Kinds that must never be bypassed with a proceed-anyway workflow.
    pub fn is_fatal_class(&self) -> bool {
        matches!(
            self,
            Self::DigestMismatch | Self::ChainIdMismatch | Self::LocalnetLeak
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_class_membership() {
        assert!(ErrorKind::DigestMismatch.is_fatal_class());
        assert!(ErrorKind::ChainIdMismatch.is_fatal_class());
        assert!(ErrorKind::LocalnetLeak.is_fatal_class());
        assert!(!ErrorKind::DirtyData.is_fatal_class());
        assert!(!ErrorKind::Fetch.is_fatal_class());
    }

    #[test]
    fn test_display_uses_snake_case() {
        assert_eq!(
            ErrorKind::ChainIdOnDiskMismatch.to_string(),
            "chain_id_on_disk_mismatch"
        );
        assert_eq!(ErrorKind::TomlKeyMissing.to_string(), "toml_key_missing");
    }
}
