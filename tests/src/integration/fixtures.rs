//! Shared fixtures: canonical manifests, genesis bytes and pipeline builders.

use std::path::Path;

use mono_02_network_registry::{manifest_url, NetworkCache, NetworkName, DEFAULT_CANONICAL_BASE, DEFAULT_GIT_REF};
use mono_09_join_pipeline::{JoinOptions, JoinPipeline, OpsConfig, TemplateInitializer};
use shared_types::MockFetcher;

pub const ID_SEED: &str = "1640233292d71449a29a34837cfce4d5ce34bb28";
pub const ID_PEER: &str = "2f1e8b3c9a4d5e6f708192a3b4c5d6e7f8091a2b";
pub const ID_BOOT: &str = "9c0d1e2f3a4b5c6d7e8f90a1b2c3d4e5f6a7b8c9";

pub const SPRINT_GENESIS_URL: &str = "https://genesis.example.org/sprintnet/genesis.json";
pub const SPRINT_GENESIS: &[u8] = br#"{"genesis_time":"2026-01-01T00:00:00Z","chain_id":"mono-sprint-1","initial_height":"1","app_state":{}}"#;

pub fn sprint_seed() -> String {
    format!("{ID_SEED}@seed-1.sprintnet.example.org:26656")
}

pub fn sprint_peer() -> String {
    format!("{ID_PEER}@10.20.0.2:26656")
}

pub fn manifest_location(name: NetworkName) -> String {
    manifest_url(DEFAULT_CANONICAL_BASE, DEFAULT_GIT_REF, name)
}

/// Sprintnet manifest publishing one seed, one persistent peer and the
/// genesis digest.
pub fn sprint_manifest() -> String {
    format!(
        r#"{{
            "network_name": "Sprintnet",
            "cosmos_chain_id": "mono-sprint-1",
            "evm_chain_id": 262146,
            "evm_chain_id_hex": "0x40002",
            "genesis_url": "{SPRINT_GENESIS_URL}",
            "genesis_sha256": "{digest}",
            "seeds": ["{seed}"],
            "persistent_peers": ["{peer}"],
            "network_status": "active"
        }}"#,
        digest = mono_03_genesis::digest_bytes(SPRINT_GENESIS),
        seed = sprint_seed(),
        peer = sprint_peer(),
    )
}

/// Fetcher serving the Sprintnet manifest and genesis.
pub fn sprint_fetcher() -> MockFetcher {
    MockFetcher::new()
        .with_body(manifest_location(NetworkName::Sprintnet), sprint_manifest())
        .with_body(SPRINT_GENESIS_URL, SPRINT_GENESIS.to_vec())
}

pub fn pipeline(fetcher: MockFetcher, cache: Option<NetworkCache>) -> JoinPipeline<MockFetcher, TemplateInitializer> {
    JoinPipeline::new(fetcher, TemplateInitializer::new(), OpsConfig::default()).with_cache(cache)
}

pub fn join_options(network: NetworkName, home: &Path) -> JoinOptions {
    JoinOptions {
        moniker: Some("ops-test".to_string()),
        detect_external_address: false,
        ..JoinOptions::new(network, home)
    }
}
