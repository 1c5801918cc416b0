//! Comparison of observed settings against a role.

use serde::Serialize;
use shared_types::Severity;

use crate::domain::role::{get_role_config, NodeRole, PruningMode};

/// Role-relevant values as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedSettings {
    pub seed_mode: bool,
    /// Raw `pruning` string; `None` when absent.
    pub pruning: Option<String>,
    pub pruning_keep_recent: Option<String>,
    pub pruning_interval: Option<String>,
}

impl ObservedSettings {
    pub fn pruning_mode(&self) -> Option<PruningMode> {
        self.pruning.as_deref().and_then(|p| p.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub expected: String,
    pub actual: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub role: NodeRole,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn has_critical(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    /// No issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

fn issue(field: &str, expected: String, actual: String, severity: Severity, message: String) -> ValidationIssue {
    ValidationIssue {
        field: field.to_string(),
        expected,
        actual,
        severity,
        message,
    }
}

/// Evaluate `observed` against `role`.
///
/// `seed_mode = true` with pruning other than `nothing` is critical for
/// every declared role.
pub fn evaluate(role: NodeRole, observed: &ObservedSettings, earliest_height: Option<u64>) -> ValidationResult {
    let want = get_role_config(role);
    let mut issues = Vec::new();
    let pruning_actual = observed.pruning.clone().unwrap_or_default();

    if observed.seed_mode != want.seed_mode {
        issues.push(issue(
            "seed_mode",
            want.seed_mode.to_string(),
            observed.seed_mode.to_string(),
            Severity::Critical,
            format!("{role} requires seed_mode = {}", want.seed_mode),
        ));
    }

    if observed.pruning_mode() != Some(want.pruning) {
        issues.push(issue(
            "pruning",
            want.pruning.to_string(),
            pruning_actual.clone(),
            Severity::Warning,
            format!("{role} expects pruning = \"{}\"", want.pruning),
        ));
    }

    for (field, expected, actual) in [
        ("pruning-keep-recent", want.pruning_keep_recent, &observed.pruning_keep_recent),
        ("pruning-interval", want.pruning_interval, &observed.pruning_interval),
    ] {
        let Some(expected) = expected else { continue };
        let matches = actual
            .as_deref()
            .and_then(|a| a.trim().parse::<u64>().ok())
            == Some(expected);
        if !matches {
            issues.push(issue(
                field,
                expected.to_string(),
                actual.clone().unwrap_or_default(),
                Severity::Info,
                format!("{role} uses {field} = \"{expected}\""),
            ));
        }
    }

    if observed.seed_mode && observed.pruning_mode() != Some(PruningMode::Nothing) {
        issues.push(issue(
            "pruning",
            PruningMode::Nothing.to_string(),
            pruning_actual,
            Severity::Critical,
            "seed_mode is on but pruning is not \"nothing\": a seed must serve full history".to_string(),
        ));
    }

    if want.requires_earliest_height_one {
        if let Some(height) = earliest_height.filter(|h| *h != 1) {
            issues.push(issue(
                "earliest_block_height",
                "1".to_string(),
                height.to_string(),
                Severity::Critical,
                format!("{role} must serve blocks from height 1, earliest available is {height}"),
            ));
        }
    }

    ValidationResult { role, issues }
}

/// Infer the role from observed settings.
pub fn infer_role(observed: &ObservedSettings) -> NodeRole {
    if observed.seed_mode {
        NodeRole::SeedNode
    } else if observed.pruning_mode() == Some(PruningMode::Nothing) {
        NodeRole::ArchiveNode
    } else {
        NodeRole::FullNode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(seed_mode: bool, pruning: &str) -> ObservedSettings {
        ObservedSettings {
            seed_mode,
            pruning: Some(pruning.to_string()),
            pruning_keep_recent: Some("100".to_string()),
            pruning_interval: Some("10".to_string()),
        }
    }

    #[test]
    fn test_matching_full_node_is_clean() {
        assert!(evaluate(NodeRole::FullNode, &observed(false, "custom"), None).is_clean());
    }

    #[test]
    fn test_seed_with_pruning_is_always_critical() {
        for role in NodeRole::ALL {
            let result = evaluate(role, &observed(true, "default"), None);
            assert!(result.has_critical(), "{role}");
            assert!(result
                .issues
                .iter()
                .any(|i| i.field == "pruning" && i.severity == Severity::Critical));
        }
    }

    #[test]
    fn test_severity_policy() {
        let result = evaluate(NodeRole::FullNode, &ObservedSettings {
            seed_mode: false,
            pruning: Some("default".to_string()),
            pruning_keep_recent: Some("0".to_string()),
            pruning_interval: None,
        }, None);

        let severities: Vec<_> = result.issues.iter().map(|i| (i.field.as_str(), i.severity)).collect();
        assert_eq!(
            severities,
            vec![
                ("pruning", Severity::Warning),
                ("pruning-keep-recent", Severity::Info),
                ("pruning-interval", Severity::Info),
            ]
        );
    }

    #[test]
    fn test_seed_mode_mismatch_is_critical() {
        let result = evaluate(NodeRole::SeedNode, &observed(false, "nothing"), None);
        assert_eq!(result.issues[0].field, "seed_mode");
        assert_eq!(result.issues[0].severity, Severity::Critical);
    }

    #[test]
    fn test_earliest_height_for_seed() {
        let ok = evaluate(NodeRole::SeedNode, &observed(true, "nothing"), Some(1));
        assert!(ok.is_clean());

        let bad = evaluate(NodeRole::SeedNode, &observed(true, "nothing"), Some(4_200));
        assert_eq!(bad.issues.len(), 1);
        assert_eq!(bad.issues[0].field, "earliest_block_height");

        let archive = evaluate(NodeRole::ArchiveNode, &observed(false, "nothing"), Some(4_200));
        assert!(archive.is_clean());
    }

    #[test]
    fn test_infer_role() {
        assert_eq!(infer_role(&observed(true, "nothing")), NodeRole::SeedNode);
        assert_eq!(infer_role(&observed(false, "nothing")), NodeRole::ArchiveNode);
        assert_eq!(infer_role(&observed(false, "default")), NodeRole::FullNode);
        assert_eq!(infer_role(&ObservedSettings::default()), NodeRole::FullNode);
    }
}
