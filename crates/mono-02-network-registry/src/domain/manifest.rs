//! Canonical network manifest (`networks/<name>.json`).
//!
//! The authoritative per-network descriptor, published in a separate
//! repository and pinned by git ref.

use mono_01_peer_registry::{Peer, PeerError};
use serde::{Deserialize, Serialize};
use shared_types::{PortScheme, RpcEndpoints, LOCALNET_EVM_CHAIN_ID};

use crate::domain::errors::RegistryError;
use crate::domain::network::{Network, NetworkName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_name: String,
    pub cosmos_chain_id: String,
    pub evm_chain_id: u64,
    #[serde(default)]
    pub evm_chain_id_hex: Option<String>,
    #[serde(default)]
    pub genesis_url: Option<String>,
    #[serde(default)]
    pub genesis_sha256: Option<String>,
    #[serde(default)]
    pub seeds: Vec<String>,
    #[serde(default)]
    pub persistent_peers: Vec<String>,
    #[serde(default)]
    pub bootstrap_peers: Vec<String>,
    #[serde(default)]
    pub rpc_endpoints: Option<RpcEndpoints>,
    #[serde(default)]
    pub port_scheme: Option<PortScheme>,
    #[serde(default)]
    pub network_status: Option<String>,
    #[serde(default)]
    pub config_version: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl NetworkConfig {
    pub fn from_json(bytes: &[u8]) -> Result<Self, RegistryError> {
        serde_json::from_slice(bytes).map_err(|e| RegistryError::Schema(e.to_string()))
    }

    /// Verify the manifest describes `expected` and is internally consistent.
    ///
    /// The Localnet guard runs first so a leak is always reported as such.
    pub fn verify(&self, expected: NetworkName) -> Result<(), RegistryError> {
        let declared = self.network_name.trim();
        let invalid = |reason: String| RegistryError::InvalidManifest {
            network: expected.to_string(),
            reason,
        };

        if !declared.eq_ignore_ascii_case(NetworkName::Localnet.as_str())
            && self.evm_chain_id == LOCALNET_EVM_CHAIN_ID
        {
            return Err(RegistryError::leak(declared));
        }

        if !declared.eq_ignore_ascii_case(expected.as_str()) {
            return Err(invalid(format!(
                "network_name is '{declared}', expected '{expected}'"
            )));
        }

        if self.cosmos_chain_id.trim().is_empty() {
            return Err(invalid("cosmos_chain_id is empty".to_string()));
        }

        if self.evm_chain_id == 0 && expected != NetworkName::Localnet {
            return Err(invalid("evm_chain_id is zero".to_string()));
        }

        if let Some(hex) = self.evm_chain_id_hex.as_deref() {
            let digits = hex
                .trim()
                .trim_start_matches("0x")
                .trim_start_matches("0X");
            match u64::from_str_radix(digits, 16) {
                Ok(v) if v == self.evm_chain_id => {}
                _ => {
                    return Err(invalid(format!(
                        "evm_chain_id_hex '{hex}' does not match evm_chain_id {}",
                        self.evm_chain_id
                    )))
                }
            }
        }

        if let Some(digest) = self.genesis_sha256.as_deref() {
            let d = digest.trim();
            if d.len() != 64 || !d.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid(format!("genesis_sha256 '{digest}' is not a SHA-256 hex digest")));
            }
        }

        for (list, entries) in [
            ("seeds", &self.seeds),
            ("persistent_peers", &self.persistent_peers),
            ("bootstrap_peers", &self.bootstrap_peers),
        ] {
            for (index, entry) in entries.iter().enumerate() {
                Peer::parse(entry)
                    .map_err(|e| invalid(format!("{list}[{index}]: {e}")))?;
            }
        }

        Ok(())
    }

    pub fn seed_peers(&self) -> Result<Vec<Peer>, PeerError> {
        self.seeds.iter().map(|s| Peer::parse(s)).collect()
    }

    pub fn persistent_peer_list(&self) -> Result<Vec<Peer>, PeerError> {
        self.persistent_peers.iter().map(|s| Peer::parse(s)).collect()
    }

    pub fn bootstrap_peer_list(&self) -> Result<Vec<Peer>, PeerError> {
        self.bootstrap_peers.iter().map(|s| Peer::parse(s)).collect()
    }

    /// Overlay this manifest onto the embedded record of the same network.
    pub fn to_network(&self, embedded: &Network) -> Network {
        Network {
            name: embedded.name,
            chain_id: self.cosmos_chain_id.trim().to_string(),
            evm_chain_id: self.evm_chain_id,
            seeds: if self.seeds.is_empty() {
                embedded.seeds.clone()
            } else {
                self.seeds.clone()
            },
            genesis_url: self
                .genesis_url
                .clone()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| embedded.genesis_url.clone()),
            peers_url: embedded.peers_url.clone(),
        }
    }
}
