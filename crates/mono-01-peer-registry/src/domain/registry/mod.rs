//! Peer registry document (`peers.json`).
//!
//! ## Element Encodings
//!
//! Every peer list accepts a mix of two element shapes, because the
//! registry migrated formats:
//!
//! ```json
//! "persistent_peers": [
//!     "1640233292d71449a29a34837cfce4d5ce34bb28@95.217.191.120:26766",
//!     { "node_id": "2b6f...", "address": "seed-2.example.org", "port": 26656 }
//! ]
//! ```
//!
//! The string form is tried first, then the object form.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use shared_types::{PortScheme, RpcEndpoints, DEFAULT_P2P_PORT};

use crate::domain::errors::{PeerError, PeersError};
use crate::domain::peer::{split_host_port, Peer};

/// The four peer lists of a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerLists {
    pub seeds: Vec<Peer>,
    pub peers: Vec<Peer>,
    pub persistent_peers: Vec<Peer>,
    pub bootstrap_peers: Vec<Peer>,
}

impl PeerLists {
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
            && self.peers.is_empty()
            && self.persistent_peers.is_empty()
            && self.bootstrap_peers.is_empty()
    }
}

/// A parsed peer registry for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeersRegistry {
    pub network: Option<String>,
    pub chain_id: String,
    pub evm_chain_id: Option<u64>,
    pub genesis_sha256: Option<String>,
    pub genesis_url: Option<String>,
    pub seeds: Vec<Peer>,
    pub peers: Vec<Peer>,
    pub persistent_peers: Vec<Peer>,
    pub bootstrap_peers: Vec<Peer>,
    pub trusted_rpc_endpoints: Vec<String>,
    pub port_scheme: Option<PortScheme>,
    pub rpc_endpoints: Option<RpcEndpoints>,
}

#[derive(Debug, Deserialize)]
struct RawLists {
    #[serde(default)]
    seeds: Option<Vec<Value>>,
    #[serde(default)]
    peers: Option<Vec<Value>>,
    #[serde(default)]
    persistent_peers: Option<Vec<Value>>,
    #[serde(default)]
    bootstrap_peers: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawRegistry {
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    chain_id: Option<String>,
    #[serde(default)]
    evm_chain_id: Option<u64>,
    #[serde(default)]
    genesis_sha256: Option<String>,
    #[serde(default)]
    genesis_url: Option<String>,
    #[serde(default)]
    trusted_rpc_endpoints: Option<Vec<String>>,
    #[serde(default)]
    port_scheme: Option<PortScheme>,
    #[serde(default)]
    rpc_endpoints: Option<RpcEndpoints>,
    #[serde(flatten)]
    lists: RawLists,
}

#[derive(Debug, Deserialize)]
struct PeerObject {
    node_id: String,
    address: String,
    #[serde(default)]
    port: Option<u64>,
}

/// Parse only the peer lists of a registry document.
///
/// Used for registry fragments that carry no chain-id.
pub fn parse_peer_lists(bytes: &[u8]) -> Result<PeerLists, PeersError> {
    let value = parse_json(bytes)?;
    let raw: RawLists =
        serde_json::from_value(value).map_err(|e| PeersError::Schema(e.to_string()))?;
    raw.into_lists()
}

impl PeersRegistry {
    /// Parse a full registry document. `chain_id` must be present and
    /// non-empty; every peer in every list must validate.
    pub fn parse(bytes: &[u8]) -> Result<Self, PeersError> {
        let value = parse_json(bytes)?;
        let raw: RawRegistry =
            serde_json::from_value(value).map_err(|e| PeersError::Schema(e.to_string()))?;

        let chain_id = raw
            .chain_id
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| PeersError::Schema("missing chain_id".to_string()))?;

        let lists = raw.lists.into_lists()?;

        Ok(Self {
            network: raw.network,
            chain_id,
            evm_chain_id: raw.evm_chain_id,
            genesis_sha256: raw
                .genesis_sha256
                .map(|d| d.trim().to_ascii_lowercase())
                .filter(|d| !d.is_empty()),
            genesis_url: raw.genesis_url.filter(|u| !u.is_empty()),
            seeds: lists.seeds,
            peers: lists.peers,
            persistent_peers: lists.persistent_peers,
            bootstrap_peers: lists.bootstrap_peers,
            trusted_rpc_endpoints: raw.trusted_rpc_endpoints.unwrap_or_default(),
            port_scheme: raw.port_scheme,
            rpc_endpoints: raw.rpc_endpoints,
        })
    }

    /// `persistent_peers` followed by `peers`, de-duplicated by node-id.
    pub fn all_persistent(&self) -> Vec<Peer> {
        merge(&self.persistent_peers, &self.peers)
    }

    pub fn seed_p2p_port(&self) -> u16 {
        self.port_scheme
            .as_ref()
            .map(PortScheme::seed_p2p_port)
            .unwrap_or(DEFAULT_P2P_PORT)
    }

    pub fn validator_p2p_port(&self, name: &str) -> u16 {
        self.port_scheme
            .as_ref()
            .map(|s| s.validator_p2p_port(name))
            .unwrap_or(DEFAULT_P2P_PORT)
    }
}

impl RawLists {
    fn into_lists(self) -> Result<PeerLists, PeersError> {
        Ok(PeerLists {
            seeds: parse_list("seeds", self.seeds)?,
            peers: parse_list("peers", self.peers)?,
            persistent_peers: parse_list("persistent_peers", self.persistent_peers)?,
            bootstrap_peers: parse_list("bootstrap_peers", self.bootstrap_peers)?,
        })
    }
}

fn parse_json(bytes: &[u8]) -> Result<Value, PeersError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| PeersError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(PeersError::Schema("top level must be an object".to_string()));
    }
    Ok(value)
}

fn parse_list(list: &'static str, raw: Option<Vec<Value>>) -> Result<Vec<Peer>, PeersError> {
    raw.unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, element)| {
            parse_element(element).map_err(|source| PeersError::Validate {
                list,
                index,
                field: source.field(),
                source,
            })
        })
        .collect()
}

fn parse_element(element: &Value) -> Result<Peer, PeerError> {
    if let Some(text) = element.as_str() {
        return Peer::parse(text);
    }
    if !element.is_object() {
        return Err(PeerError::UnsupportedShape);
    }

    let obj: PeerObject =
        serde_json::from_value(element.clone()).map_err(|_| PeerError::UnsupportedShape)?;

    match obj.port {
        Some(port) => {
            let port = u16::try_from(port)
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| PeerError::InvalidPort(port.to_string()))?;
            Peer::new(&obj.node_id, obj.address.trim(), port)
        }
        None => {
            let (host, port) = split_host_port(obj.address.trim())?;
            Peer::new(&obj.node_id, host, port)
        }
    }
}

/// Concatenate two lists, keeping the first occurrence of each node-id.
pub fn merge(a: &[Peer], b: &[Peer]) -> Vec<Peer> {
    let mut seen = HashSet::new();
    a.iter()
        .chain(b.iter())
        .filter(|p| seen.insert(p.node_id().to_string()))
        .cloned()
        .collect()
}

/// Render peers as the comma-joined string the consensus config expects.
pub fn join_peers(peers: &[Peer]) -> String {
    peers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
