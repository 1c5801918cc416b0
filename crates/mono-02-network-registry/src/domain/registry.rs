//! In-memory table of known networks.

use std::collections::HashMap;

use shared_types::LOCALNET_EVM_CHAIN_ID;

use crate::domain::embedded::embedded_networks;
use crate::domain::errors::RegistryError;
use crate::domain::network::{Network, NetworkName};

#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    networks: Vec<Network>,
}

impl NetworkRegistry {
    /// The built-in table.
    pub fn embedded() -> Self {
        Self {
            networks: embedded_networks(),
        }
    }

    /// Build a table from records, enforcing EVM-id uniqueness and the
    /// Localnet guard.
    pub fn from_networks(networks: Vec<Network>) -> Result<Self, RegistryError> {
        let mut seen: HashMap<u64, NetworkName> = HashMap::new();
        for network in &networks {
            guard_localnet(network)?;
            if network.evm_chain_id == 0 {
                continue;
            }
            if let Some(first) = seen.insert(network.evm_chain_id, network.name) {
                return Err(RegistryError::DuplicateEvmChainId {
                    evm_chain_id: network.evm_chain_id,
                    first: first.to_string(),
                    second: network.name.to_string(),
                });
            }
        }
        Ok(Self { networks })
    }

    pub fn get(&self, name: NetworkName) -> Result<&Network, RegistryError> {
        self.networks
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| RegistryError::UnknownNetwork(name.to_string()))
    }

    pub fn get_by_chain_id(&self, chain_id: &str) -> Result<&Network, RegistryError> {
        let wanted = chain_id.trim();
        self.networks
            .iter()
            .find(|n| n.chain_id == wanted)
            .ok_or_else(|| RegistryError::UnknownNetwork(wanted.to_string()))
    }

    /// Parse a network name, also accepting a consensus chain-id.
    pub fn parse_name(&self, input: &str) -> Result<NetworkName, RegistryError> {
        input
            .parse::<NetworkName>()
            .or_else(|_| self.get_by_chain_id(input).map(|n| n.name))
    }

    pub fn list(&self) -> &[Network] {
        &self.networks
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Reject a non-Localnet record carrying the Localnet EVM chain-id.
pub fn guard_localnet(network: &Network) -> Result<(), RegistryError> {
    if !network.is_localnet() && network.evm_chain_id == LOCALNET_EVM_CHAIN_ID {
        return Err(RegistryError::leak(network.name.to_string()));
    }
    Ok(())
}
