//! Peer candidate collection and sync-mode selection.

use mono_01_peer_registry::{merge, Peer, PeersRegistry};
use mono_02_network_registry::NetworkConfig;
use mono_04_toml_patcher::ConfigPatch;
use shared_types::SyncMode;

use crate::domain::errors::JoinError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerCandidates {
    pub seeds: Vec<Peer>,
    pub persistent: Vec<Peer>,
    pub bootstrap: Vec<Peer>,
}

fn parse_all(entries: &[String]) -> Vec<Peer> {
    entries.iter().filter_map(|e| Peer::parse(e).ok()).collect()
}

impl PeerCandidates {
    pub fn from_manifest(manifest: &NetworkConfig) -> Self {
        Self {
            seeds: parse_all(&manifest.seeds),
            persistent: parse_all(&manifest.persistent_peers),
            bootstrap: parse_all(&manifest.bootstrap_peers),
        }
    }

    /// Seeds of an embedded record. Bare DNS names are not peers and are
    /// dropped.
    pub fn from_seed_strings(seeds: &[String]) -> Self {
        Self {
            seeds: parse_all(seeds),
            ..Self::default()
        }
    }

    /// Registry entries first, then what was already known.
    pub fn absorb_registry(&mut self, registry: &PeersRegistry) {
        self.seeds = merge(&registry.seeds, &self.seeds);
        self.persistent = merge(&registry.all_persistent(), &self.persistent);
        self.bootstrap = merge(&registry.bootstrap_peers, &self.bootstrap);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSelection {
    pub patch: ConfigPatch,
    pub warning: Option<String>,
    pub summary: String,
}

/// Shape the config patch for `mode`.
pub fn select_sync_peers(candidates: &PeerCandidates, mode: SyncMode) -> Result<SyncSelection, JoinError> {
    match mode {
        SyncMode::Bootstrap => {
            let (peers, warning) = if !candidates.bootstrap.is_empty() {
                (&candidates.bootstrap, None)
            } else if !candidates.persistent.is_empty() {
                (
                    &candidates.persistent,
                    Some("no bootstrap peers published; using persistent peers for bootstrap sync".to_string()),
                )
            } else {
                return Err(JoinError::NoBootstrapPeers);
            };
            Ok(SyncSelection {
                patch: ConfigPatch::generate(&[], peers, mode),
                warning,
                summary: format!("mode=bootstrap, {} persistent, seeds cleared, pex off", peers.len()),
            })
        }
        SyncMode::Default | SyncMode::Statesync => Ok(SyncSelection {
            patch: ConfigPatch::generate(&candidates.seeds, &candidates.persistent, mode),
            warning: None,
            summary: format!(
                "mode={mode}, {} seeds, {} persistent",
                candidates.seeds.len(),
                candidates.persistent.len()
            ),
        }),
    }
}
