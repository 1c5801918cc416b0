//! Drift findings and repair outcomes.

use serde::Serialize;
use shared_types::Severity;

/// One field whose on-disk value differs from the canonical one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftResult {
    pub field: String,
    pub expected: String,
    /// Empty when the key is absent.
    pub actual: String,
    pub file: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    pub findings: Vec<DriftResult>,
}

impl DriftReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_critical(&self) -> bool {
        self.count(Severity::Critical) > 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn field(&self, name: &str) -> Option<&DriftResult> {
        self.findings.iter().find(|f| f.field == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairResult {
    pub field: String,
    pub file: String,
    pub before: Option<String>,
    pub after: String,
    pub changed: bool,
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(field: &str, severity: Severity) -> DriftResult {
        DriftResult {
            field: field.to_string(),
            expected: "x".to_string(),
            actual: String::new(),
            file: "config.toml".to_string(),
            severity,
        }
    }

    #[test]
    fn test_counts() {
        let report = DriftReport {
            findings: vec![
                finding("chain-id", Severity::Critical),
                finding("seeds", Severity::Warning),
                finding("persistent_peers", Severity::Warning),
            ],
        };
        assert!(report.has_critical());
        assert_eq!(report.count(Severity::Warning), 2);
        assert_eq!(report.count(Severity::Info), 0);
        assert_eq!(report.field("seeds").unwrap().file, "config.toml");
        assert!(DriftReport::default().is_clean());
    }
}
