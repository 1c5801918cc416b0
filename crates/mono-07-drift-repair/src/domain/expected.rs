//! Canonical values a node home is compared against.

use std::collections::BTreeSet;

use mono_01_peer_registry::{join_peers, Peer};
use mono_02_network_registry::NetworkConfig;
use shared_types::SyncMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedConfig {
    pub chain_id: String,
    /// 0 skips the EVM check.
    pub evm_chain_id: u64,
    /// Comma-joined, as written to `config.toml`.
    pub seeds: String,
    pub persistent_peers: String,
    /// `[p2p] pex`; `None` leaves it unchecked.
    pub pex: Option<bool>,
}

impl ExpectedConfig {
    /// Expected values from a verified manifest for a home joined in `mode`.
    ///
    /// A bootstrap home carries no seeds, the manifest's bootstrap set (or
    /// its persistent list when none is published) and PEX off. Default and
    /// statesync homes carry the seeds, the persistent list and PEX on.
    pub fn from_manifest(manifest: &NetworkConfig, mode: SyncMode) -> Self {
        let (seeds, persistent, pex) = match mode {
            SyncMode::Bootstrap => {
                let persistent = if manifest.bootstrap_peers.is_empty() {
                    &manifest.persistent_peers
                } else {
                    &manifest.bootstrap_peers
                };
                (String::new(), persistent.join(","), false)
            }
            SyncMode::Default | SyncMode::Statesync => (
                manifest.seeds.join(","),
                manifest.persistent_peers.join(","),
                true,
            ),
        };
        Self {
            chain_id: manifest.cosmos_chain_id.trim().to_string(),
            evm_chain_id: manifest.evm_chain_id,
            seeds,
            persistent_peers: persistent,
            pex: Some(pex),
        }
    }

    pub fn from_parts(
        chain_id: impl Into<String>,
        evm_chain_id: u64,
        seeds: &[Peer],
        persistent_peers: &[Peer],
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            evm_chain_id,
            seeds: join_peers(seeds),
            persistent_peers: join_peers(persistent_peers),
            pex: None,
        }
    }

    pub fn with_pex(mut self, pex: bool) -> Self {
        self.pex = Some(pex);
        self
    }
}

/// Order- and whitespace-insensitive form of a peer list. Entries that
/// parse as peers are canonicalized; others are kept as written.
pub fn peer_set(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Peer::parse(s).map(|p| p.to_string()).unwrap_or_else(|_| s.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "1640233292d71449a29a34837cfce4d5ce34bb28@seed-1.example.org:26656";
    const B: &str = "2640233292d71449a29a34837cfce4d5ce34bb28@seed-2.example.org:26656";

    #[test]
    fn test_peer_set_ignores_order_whitespace_and_case() {
        let left = peer_set(&format!("{A}, {B}"));
        let right = peer_set(
            " 2640233292D71449A29A34837CFCE4D5CE34BB28@seed-2.example.org:26656 ,\
             1640233292d71449a29a34837cfce4d5ce34bb28@seed-1.example.org,",
        );
        assert_eq!(left, right);
        assert!(peer_set("").is_empty());
    }

    #[test]
    fn test_from_manifest_follows_sync_mode() {
        let mut manifest = NetworkConfig {
            network_name: "Testnet".into(),
            cosmos_chain_id: "mono-test-1".into(),
            evm_chain_id: 262_147,
            evm_chain_id_hex: None,
            genesis_url: None,
            genesis_sha256: None,
            seeds: vec![A.into()],
            persistent_peers: vec![A.into()],
            bootstrap_peers: vec![B.into()],
            rpc_endpoints: None,
            port_scheme: None,
            network_status: None,
            config_version: None,
            updated_at: None,
        };

        let default = ExpectedConfig::from_manifest(&manifest, SyncMode::Default);
        assert_eq!(default.seeds, A);
        assert_eq!(default.persistent_peers, A);
        assert_eq!(default.pex, Some(true));
        assert_eq!(ExpectedConfig::from_manifest(&manifest, SyncMode::Statesync), default);

        let bootstrap = ExpectedConfig::from_manifest(&manifest, SyncMode::Bootstrap);
        assert_eq!(bootstrap.seeds, "");
        assert_eq!(bootstrap.persistent_peers, B);
        assert_eq!(bootstrap.pex, Some(false));

        manifest.bootstrap_peers.clear();
        let fallback = ExpectedConfig::from_manifest(&manifest, SyncMode::Bootstrap);
        assert_eq!(fallback.persistent_peers, A);
        assert_eq!(fallback.seeds, "");
    }
}
