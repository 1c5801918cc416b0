//! # Localnet EVM-id Guard
//!
//! A non-Localnet manifest carrying 262145 stops the join at network
//! resolution, whether it arrives from the canonical repository or from
//! the cache, and no fallback hides it.

use mono_02_network_registry::{NetworkCache, NetworkName, DEFAULT_GIT_REF};
use mono_09_join_pipeline::StepStatus;
use shared_types::{ErrorKind, MockFetcher, NodeHome};

use super::fixtures::*;

const TESTNET_GENESIS_URL: &str = "https://genesis.example.org/testnet/genesis.json";

fn testnet_manifest(evm_chain_id: u64) -> String {
    format!(
        r#"{{ "network_name": "Testnet", "cosmos_chain_id": "mono-test-1",
             "evm_chain_id": {evm_chain_id}, "genesis_url": "{TESTNET_GENESIS_URL}" }}"#
    )
}

fn assert_stopped_by_leak(failure: &mono_09_join_pipeline::JoinFailure, home: &NodeHome) {
    assert_eq!(failure.kind(), ErrorKind::LocalnetLeak);
    assert_eq!(failure.result.steps[0].status, StepStatus::Failed);
    let msg = failure.result.steps[0].message.as_deref().unwrap();
    assert!(msg.contains("262145"));
    assert!(msg.contains("Testnet"));
    assert!(failure.result.steps[1..].iter().all(|s| s.status == StepStatus::Pending));
    assert!(!home.root().exists());
}

#[test]
fn test_remote_leak_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let home = NodeHome::new(dir.path().join("node"));
    let fetcher = MockFetcher::new()
        .with_body(manifest_location(NetworkName::Testnet), testnet_manifest(262_145))
        .with_body(TESTNET_GENESIS_URL, br#"{"chain_id":"mono-test-1"}"#.to_vec());
    let pipeline = pipeline(fetcher, None);

    let failure = pipeline
        .run(&join_options(NetworkName::Testnet, home.root()))
        .unwrap_err();

    assert_stopped_by_leak(&failure, &home);
    assert!(failure.remediation().contains("do not proceed"));
}

#[test]
fn test_remote_leak_is_not_masked_by_good_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = NetworkCache::new(dir.path().join("cache"));
    let good = testnet_manifest(262_147);
    cache
        .store(
            NetworkName::Testnet,
            DEFAULT_GIT_REF,
            good.as_bytes(),
            &manifest_location(NetworkName::Testnet),
        )
        .unwrap();
    let home = NodeHome::new(dir.path().join("node"));
    let fetcher = MockFetcher::new()
        .with_body(manifest_location(NetworkName::Testnet), testnet_manifest(262_145));

    let failure = pipeline(fetcher, Some(cache))
        .run(&join_options(NetworkName::Testnet, home.root()))
        .unwrap_err();

    assert_stopped_by_leak(&failure, &home);
}

#[test]
fn test_cached_leak_is_fatal_when_offline() {
    let dir = tempfile::tempdir().unwrap();
    let cache = NetworkCache::new(dir.path().join("cache"));
    cache
        .store(
            NetworkName::Testnet,
            DEFAULT_GIT_REF,
            testnet_manifest(262_145).as_bytes(),
            &manifest_location(NetworkName::Testnet),
        )
        .unwrap();
    let home = NodeHome::new(dir.path().join("node"));

    let failure = pipeline(MockFetcher::new(), Some(cache))
        .run(&join_options(NetworkName::Testnet, home.root()))
        .unwrap_err();

    assert_stopped_by_leak(&failure, &home);
}

#[test]
fn test_localnet_keeps_its_reserved_id() {
    let dir = tempfile::tempdir().unwrap();
    let home = NodeHome::new(dir.path());
    let fetcher = MockFetcher::new().with_body(
        mono_02_network_registry::NetworkRegistry::embedded()
            .get(NetworkName::Localnet)
            .unwrap()
            .genesis_url
            .clone(),
        br#"{"chain_id":"mono-local-1"}"#.to_vec(),
    );

    let result = pipeline(fetcher, None)
        .run(&join_options(NetworkName::Localnet, home.root()))
        .unwrap();

    assert_eq!(result.evm_chain_id, Some(262_145));
    let app = std::fs::read_to_string(home.app_toml()).unwrap();
    assert!(app.contains("evm-chain-id = 262145\n"));
}
