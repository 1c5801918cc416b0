//! Built-in network records.
//!
//! Used for Localnet always, and as the last fallback for the other
//! networks when neither the canonical manifest nor the cache is available.

use shared_types::LOCALNET_EVM_CHAIN_ID;

use crate::domain::network::{Network, NetworkName};

/// Base of the repository publishing genesis files and peer registries.
pub const NETWORKS_REPO_BASE: &str = "https://raw.githubusercontent.com/mono-chain/networks/main";

fn record(
    name: NetworkName,
    chain_id: &str,
    evm_chain_id: u64,
    seeds: &[&str],
) -> Network {
    Network {
        name,
        chain_id: chain_id.to_string(),
        evm_chain_id,
        seeds: seeds.iter().map(|s| s.to_string()).collect(),
        genesis_url: format!("{NETWORKS_REPO_BASE}/{}/genesis.json", name.slug()),
        peers_url: format!("{NETWORKS_REPO_BASE}/{}/peers.json", name.slug()),
    }
}

pub fn embedded_networks() -> Vec<Network> {
    vec![
        record(NetworkName::Localnet, "mono-local-1", LOCALNET_EVM_CHAIN_ID, &[]),
        record(
            NetworkName::Sprintnet,
            "mono-sprint-1",
            262_146,
            &["seed-1.sprintnet.mono-chain.org", "seed-2.sprintnet.mono-chain.org"],
        ),
        record(
            NetworkName::Testnet,
            "mono-test-1",
            262_147,
            &["seed-1.testnet.mono-chain.org", "seed-2.testnet.mono-chain.org"],
        ),
        record(
            NetworkName::Mainnet,
            "mono-1",
            262_148,
            &[
                "seed-1.mainnet.mono-chain.org",
                "seed-2.mainnet.mono-chain.org",
                "seed-3.mainnet.mono-chain.org",
            ],
        ),
    ]
}
