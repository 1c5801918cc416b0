//! # Join Flows
//!
//! Canonical manifest → join pipeline → a home that drift detection and
//! role validation both accept.

use std::fs;

use mono_01_peer_registry::Peer;
use mono_02_network_registry::{NetworkCache, NetworkName};
use mono_04_toml_patcher::get_string;
use mono_06_role_applier::{self as roles, NodeRole};
use mono_07_drift_repair::{detect_drift, infer_sync_mode, repair, ExpectedConfig};
use mono_09_join_pipeline::{StepStatus, STEP_NAMES};
use shared_types::{MockFetcher, NodeHome, SyncMode};

use super::fixtures::*;

#[test]
fn test_join_from_canonical_manifest_leaves_no_drift() {
    let dir = tempfile::tempdir().unwrap();
    let home = NodeHome::new(dir.path().join("node"));
    let pipeline = pipeline(sprint_fetcher(), None);

    let result = pipeline
        .run(&join_options(NetworkName::Sprintnet, home.root()))
        .unwrap();

    assert!(result.success);
    assert_eq!(result.steps.len(), STEP_NAMES.len());
    let resolve = result.step("Resolve network").unwrap();
    assert!(resolve.message.as_deref().unwrap().contains("source=remote"));
    // The manifest digest is used when the caller supplies none.
    assert_eq!(result.status("Verify SHA256"), Some(StepStatus::Success));
    assert_eq!(fs::read(home.genesis_json()).unwrap(), SPRINT_GENESIS);

    let config = home.config_toml();
    assert_eq!(get_string(&config, "p2p", "seeds").unwrap(), Some(sprint_seed()));
    assert_eq!(get_string(&config, "p2p", "persistent_peers").unwrap(), Some(sprint_peer()));

    let manifest = mono_02_network_registry::NetworkConfig::from_json(sprint_manifest().as_bytes()).unwrap();
    let report = detect_drift(&home, &ExpectedConfig::from_manifest(&manifest, SyncMode::Default)).unwrap();
    assert!(report.is_clean(), "unexpected drift: {:?}", report.findings);
}

#[test]
fn test_join_then_apply_role() {
    let dir = tempfile::tempdir().unwrap();
    let home = NodeHome::new(dir.path());
    pipeline(sprint_fetcher(), None)
        .run(&join_options(NetworkName::Sprintnet, home.root()))
        .unwrap();

    // Stock templates carry "default" pruning.
    assert!(!roles::validate(&home, NodeRole::FullNode, None).unwrap().is_clean());

    roles::apply(&home, NodeRole::FullNode, false).unwrap();

    assert!(roles::validate(&home, NodeRole::FullNode, None).unwrap().is_clean());
    assert_eq!(roles::detect_current(&home).unwrap(), NodeRole::FullNode);
    // Role edits leave the join's chain-ids in place.
    assert_eq!(
        get_string(&home.client_toml(), "", "chain-id").unwrap().as_deref(),
        Some("mono-sprint-1")
    );
}

#[test]
fn test_cached_manifest_serves_offline_rejoin() {
    let dir = tempfile::tempdir().unwrap();
    let cache = NetworkCache::new(dir.path().join("cache"));

    pipeline(sprint_fetcher(), Some(cache.clone()))
        .run(&join_options(NetworkName::Sprintnet, &dir.path().join("a")))
        .unwrap();

    // Canonical repository unreachable; genesis host still up.
    let offline = MockFetcher::new().with_body(SPRINT_GENESIS_URL, SPRINT_GENESIS.to_vec());
    let result = pipeline(offline, Some(cache))
        .run(&join_options(NetworkName::Sprintnet, &dir.path().join("b")))
        .unwrap();

    let resolve = result.step("Resolve network").unwrap();
    assert!(resolve.message.as_deref().unwrap().contains("source=cache"));
    let config = NodeHome::new(dir.path().join("b")).config_toml();
    assert_eq!(get_string(&config, "p2p", "persistent_peers").unwrap(), Some(sprint_peer()));
}

#[test]
fn test_bootstrap_join_from_manifest_bootstrap_peers() {
    let dir = tempfile::tempdir().unwrap();
    let home = NodeHome::new(dir.path());
    let boot = format!("{ID_BOOT}@10.20.0.9:26656");
    let manifest = sprint_manifest().replace(
        r#""network_status""#,
        &format!(r#""bootstrap_peers": ["{boot}"], "network_status""#),
    );
    let fetcher = MockFetcher::new()
        .with_body(manifest_location(NetworkName::Sprintnet), manifest.clone())
        .with_body(SPRINT_GENESIS_URL, SPRINT_GENESIS.to_vec());

    let options = mono_09_join_pipeline::JoinOptions {
        sync_mode: SyncMode::Bootstrap,
        ..join_options(NetworkName::Sprintnet, home.root())
    };
    pipeline(fetcher, None).run(&options).unwrap();

    let config = home.config_toml();
    assert_eq!(get_string(&config, "p2p", "seeds").unwrap().as_deref(), Some(""));
    let written = get_string(&config, "p2p", "persistent_peers").unwrap().unwrap();
    assert_eq!(written, boot);
    let peer = Peer::parse(&written).unwrap();
    assert_eq!((peer.node_id(), peer.host(), peer.port()), (ID_BOOT, "10.20.0.9", 26656));
    assert_eq!(get_string(&config, "p2p", "pex").unwrap().as_deref(), Some("false"));

    // PEX off marks the home as bootstrap; drift and repair keep it that way.
    let mode = infer_sync_mode(&home).unwrap();
    assert_eq!(mode, SyncMode::Bootstrap);
    let manifest = mono_02_network_registry::NetworkConfig::from_json(manifest.as_bytes()).unwrap();
    let expected = ExpectedConfig::from_manifest(&manifest, mode);
    let report = detect_drift(&home, &expected).unwrap();
    assert!(report.is_clean(), "unexpected drift: {:?}", report.findings);

    let results = repair(&home, &expected, false);
    assert!(results.iter().all(|r| r.success && !r.changed));
    assert_eq!(get_string(&config, "p2p", "seeds").unwrap().as_deref(), Some(""));
    assert_eq!(get_string(&config, "p2p", "pex").unwrap().as_deref(), Some("false"));
}
