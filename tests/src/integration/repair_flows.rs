//! # Drift and Repair Flows
//!
//! Join, tamper with the home the way operators do by hand, then detect
//! and repair against the canonical manifest.

use std::fs;

use mono_02_network_registry::{NetworkConfig, NetworkName};
use mono_04_toml_patcher::get_string;
use mono_07_drift_repair::{detect_drift, repair, ExpectedConfig};
use shared_types::{NodeHome, Severity, SyncMode};

use super::fixtures::*;

fn joined_home() -> (tempfile::TempDir, NodeHome, ExpectedConfig) {
    let dir = tempfile::tempdir().unwrap();
    let home = NodeHome::new(dir.path());
    pipeline(sprint_fetcher(), None)
        .run(&join_options(NetworkName::Sprintnet, home.root()))
        .unwrap();
    let manifest = NetworkConfig::from_json(sprint_manifest().as_bytes()).unwrap();
    (dir, home, ExpectedConfig::from_manifest(&manifest, SyncMode::Default))
}

fn replace_in(path: &std::path::Path, from: &str, to: &str) {
    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains(from), "{from} not in {}", path.display());
    fs::write(path, content.replace(from, to)).unwrap();
}

#[test]
fn test_tampered_home_is_repaired() {
    let (_dir, home, expected) = joined_home();
    replace_in(&home.client_toml(), r#"chain-id = "mono-sprint-1""#, r#"chain-id = "mono-test-1""#);
    replace_in(&home.app_toml(), "evm-chain-id = 262146", "evm-chain-id = 262145");
    replace_in(
        &home.config_toml(),
        &format!(r#"persistent_peers = "{}""#, sprint_peer()),
        r#"persistent_peers = """#,
    );

    let report = detect_drift(&home, &expected).unwrap();
    assert!(report.has_critical());
    assert_eq!(report.count(Severity::Critical), 2);
    assert_eq!(report.field("chain-id").unwrap().actual, "mono-test-1");
    assert_eq!(report.field("persistent_peers").unwrap().severity, Severity::Warning);

    let preview = repair(&home, &expected, true);
    assert!(preview.iter().all(|r| r.success));
    assert!(!detect_drift(&home, &expected).unwrap().is_clean());

    let results = repair(&home, &expected, false);
    assert!(results.iter().all(|r| r.success));
    assert!(results.iter().any(|r| r.field == "chain-id" && r.changed));

    assert!(detect_drift(&home, &expected).unwrap().is_clean());
    assert_eq!(
        get_string(&home.client_toml(), "", "chain-id").unwrap().as_deref(),
        Some("mono-sprint-1")
    );
}

#[test]
fn test_reordered_peers_are_not_drift() {
    let (_dir, home, mut expected) = joined_home();
    let extra = format!("{ID_BOOT}@10.20.0.9:26656");
    expected.persistent_peers = format!("{extra}, {}", sprint_peer());
    replace_in(
        &home.config_toml(),
        &format!(r#"persistent_peers = "{}""#, sprint_peer()),
        &format!(r#"persistent_peers = "{},{extra}""#, sprint_peer()),
    );

    let report = detect_drift(&home, &expected).unwrap();

    assert!(report.field("persistent_peers").is_none());
}

#[test]
fn test_repair_of_clean_home_changes_nothing() {
    let (_dir, home, expected) = joined_home();
    let before = fs::read(home.config_toml()).unwrap();

    let results = repair(&home, &expected, false);

    assert!(results.iter().all(|r| r.success && !r.changed));
    assert_eq!(fs::read(home.config_toml()).unwrap(), before);
}
