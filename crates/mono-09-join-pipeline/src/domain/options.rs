//! Caller-supplied join parameters.

use std::path::PathBuf;

use mono_02_network_registry::NetworkName;
use shared_types::SyncMode;

#[derive(Debug, Clone)]
pub struct JoinOptions {
    pub network: NetworkName,
    pub home: PathBuf,
    /// Derived from the hostname when unset.
    pub moniker: Option<String>,
    /// Overrides the network's genesis URL.
    pub genesis_url: Option<String>,
    /// Expected genesis digest; takes precedence over the published one.
    pub genesis_sha256: Option<String>,
    /// Overrides the network's peer-registry URL.
    pub peers_url: Option<String>,
    pub use_peer_registry: bool,
    pub sync_mode: SyncMode,
    /// Remove `addrbook.json` even outside bootstrap mode.
    pub clear_addrbook: bool,
    pub detect_external_address: bool,
    pub dry_run: bool,
}

impl JoinOptions {
    pub fn new(network: NetworkName, home: impl Into<PathBuf>) -> Self {
        Self {
            network,
            home: home.into(),
            moniker: None,
            genesis_url: None,
            genesis_sha256: None,
            peers_url: None,
            use_peer_registry: true,
            sync_mode: SyncMode::Default,
            clear_addrbook: false,
            detect_external_address: true,
            dry_run: false,
        }
    }
}
