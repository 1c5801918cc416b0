//! Human-readable and JSON renderings of command results.

use std::fmt::Write;

use mono_02_network_registry::Network;
use mono_06_role_applier::{ApplyResult, ValidationResult};
use mono_07_drift_repair::{DriftReport, RepairResult};
use mono_09_join_pipeline::{JoinFailure, JoinResult, StepStatus};
use serde::Serialize;
use serde_json::json;

pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn marker(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Success => "[ok]  ",
        StepStatus::Skipped => "[skip]",
        StepStatus::Failed => "[FAIL]",
        StepStatus::Pending => "[--]  ",
    }
}

pub fn join_report(result: &JoinResult) -> String {
    let mut out = String::new();
    for step in &result.steps {
        let _ = match &step.message {
            Some(message) => writeln!(out, "{} {}: {message}", marker(step.status), step.name),
            None => writeln!(out, "{} {}", marker(step.status), step.name),
        };
    }
    for warning in &result.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    if result.success {
        let _ = writeln!(
            out,
            "joined {} (chain-id {}){}",
            result.network.as_deref().unwrap_or("?"),
            result.chain_id.as_deref().unwrap_or("?"),
            if result.dry_run { " [dry-run]" } else { "" }
        );
    }
    out
}

pub fn join_failure(failure: &JoinFailure) -> String {
    format!(
        "error[{}]: {}\nremediation: {}\n",
        failure.kind().as_str(),
        failure.error,
        failure.remediation()
    )
}

/// Failure as one JSON document: the partial report plus the error.
pub fn join_failure_json(failure: &JoinFailure) -> anyhow::Result<String> {
    to_json(&json!({
        "result": failure.result,
        "error": {
            "kind": failure.kind().as_str(),
            "message": failure.error.to_string(),
            "remediation": failure.remediation(),
        },
    }))
}

pub fn drift_report(report: &DriftReport) -> String {
    if report.is_clean() {
        return "no drift\n".to_string();
    }
    let mut out = String::new();
    for f in &report.findings {
        let _ = writeln!(
            out,
            "{:<8} {} ({}): expected {:?}, found {:?}",
            f.severity.as_str(),
            f.field,
            f.file,
            f.expected,
            f.actual
        );
    }
    out
}

pub fn repair_results(results: &[RepairResult]) -> String {
    let mut out = String::new();
    for r in results {
        let status = if !r.success {
            "failed"
        } else if r.changed {
            "fixed"
        } else {
            "ok"
        };
        let _ = writeln!(out, "{status:<6} {} ({}): {}", r.field, r.file, r.message);
    }
    out
}

pub fn validation(result: &ValidationResult) -> String {
    if result.is_clean() {
        return format!("{}: settings match\n", result.role);
    }
    let mut out = String::new();
    for issue in &result.issues {
        let _ = writeln!(out, "{:<8} {}: {}", issue.severity.as_str(), issue.field, issue.message);
    }
    out
}

pub fn role_applied(result: &ApplyResult, dry_run: bool) -> String {
    let changed = result
        .config_toml
        .applied
        .iter()
        .chain(&result.app_toml.applied)
        .filter(|a| a.changed())
        .count();
    format!(
        "{}: {changed} setting(s) {}\n",
        result.role,
        if dry_run { "would change (dry-run)" } else { "changed" }
    )
}

pub fn networks(list: &[Network]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<16} {:>12}", "NETWORK", "CHAIN-ID", "EVM-CHAIN-ID");
    for n in list {
        let _ = writeln!(out, "{:<10} {:<16} {:>12}", n.name.as_str(), n.chain_id, n.evm_chain_id);
    }
    out
}

pub fn networks_json(list: &[Network]) -> anyhow::Result<String> {
    let rows: Vec<_> = list
        .iter()
        .map(|n| {
            json!({
                "name": n.name.as_str(),
                "chain_id": n.chain_id,
                "evm_chain_id": n.evm_chain_id,
                "genesis_url": n.genesis_url,
                "peers_url": n.peers_url,
            })
        })
        .collect();
    to_json(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mono_02_network_registry::NetworkRegistry;
    use mono_07_drift_repair::DriftResult;
    use shared_types::Severity;

    #[test]
    fn test_drift_rendering() {
        assert_eq!(drift_report(&DriftReport::default()), "no drift\n");

        let report = DriftReport {
            findings: vec![DriftResult {
                field: "chain-id".to_string(),
                expected: "mono-1".to_string(),
                actual: String::new(),
                file: "client.toml".to_string(),
                severity: Severity::Critical,
            }],
        };
        let text = drift_report(&report);
        assert!(text.starts_with("critical"));
        assert!(text.contains("expected \"mono-1\", found \"\""));
    }

    #[test]
    fn test_networks_table_and_json() {
        let registry = NetworkRegistry::embedded();
        let text = networks(registry.list());
        assert!(text.contains("Sprintnet"));
        assert!(text.contains("262146"));

        let parsed: serde_json::Value = serde_json::from_str(&networks_json(registry.list()).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 4);
    }
}
