//! # Shared Constants
//!
//! Values fixed by the consensus layer or by the network operators.

use std::time::Duration;

/// Default P2P port of the consensus layer.
pub const DEFAULT_P2P_PORT: u16 = 26656;

/// EVM chain-id reserved for Localnet.
///
/// Must never appear on any other network's record.
pub const LOCALNET_EVM_CHAIN_ID: u64 = 262_145;

/// Name of the node daemon binary.
pub const NODE_BINARY_NAME: &str = "monod";

/// Timeout for metadata fetches (manifests, peer registries).
pub const METADATA_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for genesis downloads.
pub const GENESIS_FETCH_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for a single public-IP probe.
pub const ADDRESS_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Mode for directories created by the tool.
pub const DIR_MODE: u32 = 0o755;

/// Mode for files written by the tool.
pub const FILE_MODE: u32 = 0o644;
