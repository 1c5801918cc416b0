//! # Drift Detection and Repair
//!
//! | Field            | File        | Section | Severity |
//! |------------------|-------------|---------|----------|
//! | chain-id         | client.toml | (top)   | critical |
//! | evm-chain-id     | app.toml    | evm     | critical |
//! | seeds            | config.toml | p2p     | warning  |
//! | persistent_peers | config.toml | p2p     | warning  |
//! | pex              | config.toml | p2p     | warning  |
//!
//! Peer lists compare as sets. The EVM row is skipped when the expected
//! EVM chain-id is 0, the PEX row when no PEX value is expected.

use std::path::PathBuf;

use mono_04_toml_patcher::{get_string, patch_file, PatchMode, TomlEdit, TomlValue};
use shared_types::{NodeHome, Severity, SyncMode};
use tracing::{info, warn};

use crate::domain::{peer_set, DriftError, DriftReport, DriftResult, ExpectedConfig, RepairResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compare {
    Exact,
    Integer,
    PeerSet,
}

struct Field {
    name: &'static str,
    path: PathBuf,
    section: &'static str,
    expected: TomlValue,
    compare: Compare,
    severity: Severity,
}

impl Field {
    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn expected_text(&self) -> String {
        match &self.expected {
            TomlValue::Str(s) | TomlValue::Raw(s) => s.clone(),
            other => other.render(),
        }
    }

    fn matches(&self, actual: &str) -> bool {
        let expected = self.expected_text();
        match self.compare {
            Compare::Exact => actual == expected,
            Compare::Integer => actual.trim().parse::<u64>().ok() == expected.parse::<u64>().ok(),
            Compare::PeerSet => peer_set(actual) == peer_set(&expected),
        }
    }
}

fn fields(home: &NodeHome, expected: &ExpectedConfig) -> Vec<Field> {
    let mut fields = vec![Field {
        name: "chain-id",
        path: home.client_toml(),
        section: "",
        expected: TomlValue::str(&expected.chain_id),
        compare: Compare::Exact,
        severity: Severity::Critical,
    }];
    if expected.evm_chain_id != 0 {
        fields.push(Field {
            name: "evm-chain-id",
            path: home.app_toml(),
            section: "evm",
            expected: TomlValue::Int(expected.evm_chain_id),
            compare: Compare::Integer,
            severity: Severity::Critical,
        });
    }
    for (name, value) in [
        ("seeds", &expected.seeds),
        ("persistent_peers", &expected.persistent_peers),
    ] {
        fields.push(Field {
            name,
            path: home.config_toml(),
            section: "p2p",
            expected: TomlValue::str(value),
            compare: Compare::PeerSet,
            severity: Severity::Warning,
        });
    }
    if let Some(pex) = expected.pex {
        fields.push(Field {
            name: "pex",
            path: home.config_toml(),
            section: "p2p",
            expected: TomlValue::Bool(pex),
            compare: Compare::Exact,
            severity: Severity::Warning,
        });
    }
    fields
}

/// Sync mode a joined home was configured for: PEX off means bootstrap.
pub fn infer_sync_mode(home: &NodeHome) -> Result<SyncMode, DriftError> {
    let pex = get_string(&home.config_toml(), "p2p", "pex")?;
    Ok(match pex.as_deref() {
        Some("false") => SyncMode::Bootstrap,
        _ => SyncMode::Default,
    })
}

/// Compare the home's config files with `expected`.
pub fn detect_drift(home: &NodeHome, expected: &ExpectedConfig) -> Result<DriftReport, DriftError> {
    let mut report = DriftReport::default();

    for field in fields(home, expected) {
        let actual = get_string(&field.path, field.section, field.name)?.unwrap_or_default();
        if field.matches(&actual) {
            continue;
        }
        report.findings.push(DriftResult {
            field: field.name.to_string(),
            expected: field.expected_text(),
            actual,
            file: field.file_name(),
            severity: field.severity,
        });
    }

    info!(
        home = %home.root().display(),
        critical = report.count(Severity::Critical),
        warnings = report.count(Severity::Warning),
        "drift check complete"
    );
    Ok(report)
}

/// Write every canonical value. Each field is patched on its own; a failure
/// is recorded and the remaining fields are still attempted.
pub fn repair(home: &NodeHome, expected: &ExpectedConfig, dry_run: bool) -> Vec<RepairResult> {
    fields(home, expected)
        .into_iter()
        .map(|field| repair_field(&field, dry_run))
        .collect()
}

fn repair_field(field: &Field, dry_run: bool) -> RepairResult {
    let before = get_string(&field.path, field.section, field.name).ok().flatten();
    let edit = TomlEdit::new(field.section, field.name, field.expected.clone());
    let suffix = if dry_run { " (dry-run)" } else { "" };

    let mut result = RepairResult {
        field: field.name.to_string(),
        file: field.file_name(),
        before: before.clone(),
        after: field.expected_text(),
        changed: false,
        success: false,
        message: String::new(),
    };

    match patch_file(&field.path, &[edit], PatchMode::Lenient, dry_run) {
        Ok(outcome) if !outcome.is_complete() => {
            result.message = format!("key not found in [{}]", field.section);
            warn!(field = field.name, file = %result.file, "repair skipped: key not found");
        }
        Ok(_) => {
            result.success = true;
            result.changed = !before.as_deref().is_some_and(|b| field.matches(b));
            result.message = if result.changed {
                format!("updated{suffix}")
            } else {
                format!("already canonical{suffix}")
            };
        }
        Err(e) => {
            warn!(field = field.name, error = %e, "repair failed");
            result.message = e.to_string();
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SEED: &str = "1640233292d71449a29a34837cfce4d5ce34bb28@seed-1.example.org:26656";
    const PEER: &str = "2640233292d71449a29a34837cfce4d5ce34bb28@peer-1.example.org:26656";

    fn expected() -> ExpectedConfig {
        ExpectedConfig {
            chain_id: "mono-test-1".into(),
            evm_chain_id: 262_147,
            seeds: SEED.into(),
            persistent_peers: PEER.into(),
            pex: None,
        }
    }

    fn home(client: &str, app: &str, config: &str) -> (tempfile::TempDir, NodeHome) {
        let dir = tempfile::tempdir().unwrap();
        let home = NodeHome::new(dir.path());
        fs::create_dir_all(home.config_dir()).unwrap();
        fs::write(home.client_toml(), client).unwrap();
        fs::write(home.app_toml(), app).unwrap();
        fs::write(home.config_toml(), config).unwrap();
        (dir, home)
    }

    fn drifted() -> (tempfile::TempDir, NodeHome) {
        home(
            "chain-id = \"mono-local-1\"\n",
            "[evm]\nevm-chain-id = 262145\n",
            &format!("[p2p]\nseeds = \"\"\npersistent_peers = \"{PEER}\"\n"),
        )
    }

    #[test]
    fn test_clean_home_has_no_drift() {
        let (_dir, home) = home(
            "chain-id = \"mono-test-1\"\n",
            "[evm]\nevm-chain-id = 262147\n",
            &format!("[p2p]\nseeds = \"{SEED}\"\npersistent_peers = \"{PEER}\"\n"),
        );
        assert!(detect_drift(&home, &expected()).unwrap().is_clean());
    }

    #[test]
    fn test_severity_policy() {
        let (_dir, home) = drifted();
        let report = detect_drift(&home, &expected()).unwrap();

        let fields: Vec<_> = report.findings.iter().map(|f| (f.field.as_str(), f.severity)).collect();
        assert_eq!(
            fields,
            vec![
                ("chain-id", Severity::Critical),
                ("evm-chain-id", Severity::Critical),
                ("seeds", Severity::Warning),
            ]
        );
        let chain = report.field("chain-id").unwrap();
        assert_eq!(chain.actual, "mono-local-1");
        assert_eq!(chain.file, "client.toml");
    }

    #[test]
    fn test_missing_key_reports_empty_actual() {
        let (_dir, home) = home(
            "keyring-backend = \"os\"\n",
            "[evm]\nevm-chain-id = 262147\n",
            &format!("[p2p]\nseeds = \"{SEED}\"\npersistent_peers = \"{PEER}\"\n"),
        );
        let report = detect_drift(&home, &expected()).unwrap();
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].actual, "");
    }

    #[test]
    fn test_repair_then_detect_is_clean() {
        let (_dir, home) = drifted();

        let results = repair(&home, &expected(), false);

        assert!(results.iter().all(|r| r.success));
        let changed: Vec<_> = results.iter().filter(|r| r.changed).map(|r| r.field.as_str()).collect();
        assert_eq!(changed, vec!["chain-id", "evm-chain-id", "seeds"]);
        assert_eq!(results[0].before.as_deref(), Some("mono-local-1"));
        assert!(detect_drift(&home, &expected()).unwrap().is_clean());
    }

    #[test]
    fn test_repair_continues_past_failures() {
        let (_dir, home) = drifted();
        fs::write(home.client_toml(), "keyring-backend = \"os\"\n").unwrap();
        fs::remove_file(home.app_toml()).unwrap();

        let results = repair(&home, &expected(), false);

        assert!(!results[0].success);
        assert!(results[0].message.contains("not found"));
        assert!(!results[1].success);
        assert!(results[2].success && results[3].success);
    }

    #[test]
    fn test_pex_is_checked_and_repaired_when_expected() {
        let (_dir, home) = home(
            "chain-id = \"mono-test-1\"\n",
            "[evm]\nevm-chain-id = 262147\n",
            &format!("[p2p]\nseeds = \"\"\npersistent_peers = \"{PEER}\"\npex = true\n"),
        );
        let bootstrap = ExpectedConfig {
            seeds: String::new(),
            ..expected()
        }
        .with_pex(false);

        assert_eq!(infer_sync_mode(&home).unwrap(), SyncMode::Default);
        let report = detect_drift(&home, &bootstrap).unwrap();
        let fields: Vec<_> = report.findings.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["pex"]);
        assert_eq!(report.findings[0].expected, "false");

        let results = repair(&home, &bootstrap, false);
        assert!(results.iter().all(|r| r.success));
        assert_eq!(get_string(&home.config_toml(), "p2p", "pex").unwrap().as_deref(), Some("false"));
        assert_eq!(infer_sync_mode(&home).unwrap(), SyncMode::Bootstrap);
        assert!(detect_drift(&home, &bootstrap).unwrap().is_clean());
    }

    #[test]
    fn test_dry_run_repair_writes_nothing() {
        let (_dir, home) = drifted();
        let before = fs::read_to_string(home.client_toml()).unwrap();

        let results = repair(&home, &expected(), true);

        assert!(results[0].changed);
        assert!(results[0].message.ends_with("(dry-run)"));
        assert_eq!(fs::read_to_string(home.client_toml()).unwrap(), before);
    }
}
