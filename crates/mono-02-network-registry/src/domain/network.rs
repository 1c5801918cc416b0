//! Network identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::RegistryError;

/// The closed set of known networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetworkName {
    Localnet,
    Sprintnet,
    Testnet,
    Mainnet,
}

impl NetworkName {
    pub const ALL: [NetworkName; 4] = [
        NetworkName::Localnet,
        NetworkName::Sprintnet,
        NetworkName::Testnet,
        NetworkName::Mainnet,
    ];

    /// Display spelling, as used in manifests (`network_name`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Localnet => "Localnet",
            Self::Sprintnet => "Sprintnet",
            Self::Testnet => "Testnet",
            Self::Mainnet => "Mainnet",
        }
    }

    /// Lowercase spelling used in URLs and cache paths.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Localnet => "localnet",
            Self::Sprintnet => "sprintnet",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for NetworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "localnet" | "local" => Ok(Self::Localnet),
            "sprintnet" | "sprint" => Ok(Self::Sprintnet),
            "testnet" | "test" => Ok(Self::Testnet),
            "mainnet" | "main" => Ok(Self::Mainnet),
            _ => Err(RegistryError::UnknownNetwork(s.trim().to_string())),
        }
    }
}

/// Identity of a target chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub name: NetworkName,
    /// Consensus chain-id.
    pub chain_id: String,
    /// EVM chain-id; 0 when the network has no EVM layer.
    pub evm_chain_id: u64,
    /// Seed addresses as published (DNS names or peer strings).
    pub seeds: Vec<String>,
    pub genesis_url: String,
    pub peers_url: String,
}

impl Network {
    pub fn is_localnet(&self) -> bool {
        self.name == NetworkName::Localnet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("SPRINTNET".parse::<NetworkName>().unwrap(), NetworkName::Sprintnet);
        assert_eq!(" testnet ".parse::<NetworkName>().unwrap(), NetworkName::Testnet);
        assert_eq!("main".parse::<NetworkName>().unwrap(), NetworkName::Mainnet);
    }

    #[test]
    fn test_unknown_name() {
        let err = "devnet".parse::<NetworkName>().unwrap_err();
        assert_eq!(err.kind(), shared_types::ErrorKind::NetworkUnknown);
        assert!(err.to_string().contains("devnet"));
    }

    #[test]
    fn test_slug_and_display() {
        for name in NetworkName::ALL {
            assert_eq!(name.slug(), name.as_str().to_ascii_lowercase());
            assert_eq!(name.to_string().parse::<NetworkName>().unwrap(), name);
        }
    }
}
