//! # Shared Entities
//!
//! Small value types used by more than one subsystem.
//!
//! ## Clusters
//!
//! - **Findings**: `Severity`
//! - **Sync**: `SyncMode`
//! - **Registry records**: `PortScheme`, `PortPair`, `RpcEndpoints`

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_P2P_PORT;

// =============================================================================
// FINDINGS
// =============================================================================

/// Severity of a drift finding or role validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Consensus-affecting: the node will fork or fail to start.
    Critical,
    /// Degraded operation: peers, pruning.
    Warning,
    /// Informational only.
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SYNC
// =============================================================================

/// How a joining node finds its first peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Seeds plus peer exchange.
    #[default]
    Default,
    /// Trusted persistent peers only, peer exchange off.
    Bootstrap,
    /// Seeds plus peer exchange, snapshot restore through trusted RPCs.
    Statesync,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Bootstrap => "bootstrap",
            Self::Statesync => "statesync",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "bootstrap" => Ok(Self::Bootstrap),
            "statesync" | "state-sync" => Ok(Self::Statesync),
            other => Err(format!("unknown sync mode: {other}")),
        }
    }
}

// =============================================================================
// REGISTRY RECORDS
// =============================================================================

/// P2P and RPC port pair for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPair {
    pub p2p: u16,
    pub rpc: u16,
}

/// Per-role port overrides published alongside a peer registry.
///
/// ```json
/// { "seeds": { "p2p": 26656, "rpc": 26657 },
///   "validators": { "default": { "p2p": 26656, "rpc": 26657 } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortScheme {
    #[serde(default)]
    pub seeds: Option<PortPair>,
    #[serde(default)]
    pub validators: BTreeMap<String, PortPair>,
}

impl PortScheme {
    /// Seed P2P port, or the consensus default.
    pub fn seed_p2p_port(&self) -> u16 {
        self.seeds.map(|p| p.p2p).unwrap_or(DEFAULT_P2P_PORT)
    }

    /// Named validator override, then the `default` override, then the
    /// consensus default.
    pub fn validator_p2p_port(&self, name: &str) -> u16 {
        self.validators
            .get(name)
            .or_else(|| self.validators.get("default"))
            .map(|p| p.p2p)
            .unwrap_or(DEFAULT_P2P_PORT)
    }
}

/// Public RPC endpoints of a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcEndpoints {
    #[serde(default)]
    pub comet_rpc: Vec<String>,
    #[serde(default)]
    pub cosmos_rest: Vec<String>,
    #[serde(default)]
    pub evm_rpc: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> PortScheme {
        let mut validators = BTreeMap::new();
        validators.insert("default".to_string(), PortPair { p2p: 26700, rpc: 26701 });
        validators.insert("val-1".to_string(), PortPair { p2p: 26800, rpc: 26801 });
        PortScheme {
            seeds: Some(PortPair { p2p: 26766, rpc: 26767 }),
            validators,
        }
    }

    #[test]
    fn test_seed_port_falls_back_to_default() {
        assert_eq!(scheme().seed_p2p_port(), 26766);
        assert_eq!(PortScheme::default().seed_p2p_port(), DEFAULT_P2P_PORT);
    }

    #[test]
    fn test_validator_port_lookup_order() {
        let s = scheme();
        assert_eq!(s.validator_p2p_port("val-1"), 26800);
        assert_eq!(s.validator_p2p_port("val-9"), 26700);
        assert_eq!(PortScheme::default().validator_p2p_port("val-1"), DEFAULT_P2P_PORT);
    }

    #[test]
    fn test_sync_mode_parsing() {
        assert_eq!("Bootstrap".parse::<SyncMode>(), Ok(SyncMode::Bootstrap));
        assert_eq!("state-sync".parse::<SyncMode>(), Ok(SyncMode::Statesync));
        assert!("fast".parse::<SyncMode>().is_err());
    }

    #[test]
    fn test_severity_ordering_puts_critical_first() {
        let mut v = vec![Severity::Info, Severity::Critical, Severity::Warning];
        v.sort();
        assert_eq!(v, vec![Severity::Critical, Severity::Warning, Severity::Info]);
    }
}
