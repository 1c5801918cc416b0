//! Disk-facing role operations.

use mono_04_toml_patcher::{
    get_string, get_value, patch_file, value_to_string, PatchMode, PatchOutcome, TomlEdit,
    TomlValue,
};
use shared_types::NodeHome;
use tracing::info;

use crate::domain::{
    evaluate, get_role_config, infer_role, NodeRole, ObservedSettings, RoleError, ValidationResult,
};

fn as_bool(value: &toml::Value) -> bool {
    match value {
        toml::Value::Boolean(b) => *b,
        other => value_to_string(other).trim().eq_ignore_ascii_case("true"),
    }
}

/// Read `seed_mode` from `config.toml [p2p]` and the pruning keys from
/// `app.toml`.
pub fn read_observed(home: &NodeHome) -> Result<ObservedSettings, RoleError> {
    let app = home.app_toml();
    Ok(ObservedSettings {
        seed_mode: get_value(&home.config_toml(), "p2p", "seed_mode")?
            .map(|v| as_bool(&v))
            .unwrap_or(false),
        pruning: get_string(&app, "", "pruning")?,
        pruning_keep_recent: get_string(&app, "", "pruning-keep-recent")?,
        pruning_interval: get_string(&app, "", "pruning-interval")?,
    })
}

pub fn validate(
    home: &NodeHome,
    role: NodeRole,
    earliest_height: Option<u64>,
) -> Result<ValidationResult, RoleError> {
    let observed = read_observed(home)?;
    Ok(evaluate(role, &observed, earliest_height))
}

pub fn detect_current(home: &NodeHome) -> Result<NodeRole, RoleError> {
    Ok(infer_role(&read_observed(home)?))
}

/// Patches written by [`apply`], per file.
#[derive(Debug, Clone)]
pub struct ApplyResult {
    pub role: NodeRole,
    pub config_toml: PatchOutcome,
    pub app_toml: PatchOutcome,
}

/// Write the role's `seed_mode` and pruning keys.
///
/// Both files are checked before either is written, so a template missing
/// a key leaves the home untouched.
pub fn apply(home: &NodeHome, role: NodeRole, dry_run: bool) -> Result<ApplyResult, RoleError> {
    let want = get_role_config(role);

    let config_path = home.config_toml();
    let config_edits = [TomlEdit::new("p2p", "seed_mode", TomlValue::Bool(want.seed_mode))];

    let app_path = home.app_toml();
    let mut app_edits = vec![TomlEdit::top_level("pruning", TomlValue::str(want.pruning.as_str()))];
    if let Some(keep) = want.pruning_keep_recent {
        app_edits.push(TomlEdit::top_level("pruning-keep-recent", TomlValue::str(keep.to_string())));
    }
    if let Some(interval) = want.pruning_interval {
        app_edits.push(TomlEdit::top_level("pruning-interval", TomlValue::str(interval.to_string())));
    }

    let mut config_toml = patch_file(&config_path, &config_edits, PatchMode::Strict, true)?;
    let mut app_toml = patch_file(&app_path, &app_edits, PatchMode::Strict, true)?;
    if !dry_run {
        config_toml = patch_file(&config_path, &config_edits, PatchMode::Strict, false)?;
        app_toml = patch_file(&app_path, &app_edits, PatchMode::Strict, false)?;
    }

    info!(home = %home.root().display(), %role, dry_run, "role applied");
    Ok(ApplyResult {
        role,
        config_toml,
        app_toml,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const APP_TOML: &str = "# app\npruning = \"default\"\npruning-keep-recent = \"0\"\npruning-interval = \"0\"\n\n[evm]\nevm-chain-id = 262146\n";
    const CONFIG_TOML: &str = "[p2p]\npex = true\nseed_mode = false\n";

    fn home() -> (tempfile::TempDir, NodeHome) {
        let dir = tempfile::tempdir().unwrap();
        let home = NodeHome::new(dir.path());
        fs::create_dir_all(home.config_dir()).unwrap();
        fs::write(home.app_toml(), APP_TOML).unwrap();
        fs::write(home.config_toml(), CONFIG_TOML).unwrap();
        (dir, home)
    }

    #[test]
    fn test_apply_then_validate_each_role() {
        for role in NodeRole::ALL {
            let (_dir, home) = home();
            apply(&home, role, false).unwrap();

            let result = validate(&home, role, None).unwrap();
            assert!(result.is_clean(), "{role}: {:?}", result.issues);
            assert_eq!(detect_current(&home).unwrap(), role);
        }
    }

    #[test]
    fn test_apply_preserves_other_lines() {
        let (_dir, home) = home();
        apply(&home, NodeRole::SeedNode, false).unwrap();

        let app = fs::read_to_string(home.app_toml()).unwrap();
        assert!(app.starts_with("# app\npruning = \"nothing\"\n"));
        assert!(app.contains("pruning-keep-recent = \"0\"\n"));
        assert!(app.ends_with("[evm]\nevm-chain-id = 262146\n"));
        assert_eq!(
            fs::read_to_string(home.config_toml()).unwrap(),
            "[p2p]\npex = true\nseed_mode = true\n"
        );
    }

    #[test]
    fn test_dry_run_apply_writes_nothing() {
        let (_dir, home) = home();
        let result = apply(&home, NodeRole::ArchiveNode, true).unwrap();

        assert_eq!(result.app_toml.applied.len(), 1);
        assert_eq!(fs::read_to_string(home.app_toml()).unwrap(), APP_TOML);
    }

    #[test]
    fn test_missing_app_key_leaves_both_files_untouched() {
        let (_dir, home) = home();
        let app = "pruning-keep-recent = \"0\"\npruning-interval = \"0\"\n";
        fs::write(home.app_toml(), app).unwrap();

        let err = apply(&home, NodeRole::SeedNode, false).unwrap_err();

        assert_eq!(err.kind(), shared_types::ErrorKind::TomlKeyMissing);
        assert_eq!(fs::read_to_string(home.config_toml()).unwrap(), CONFIG_TOML);
        assert_eq!(fs::read_to_string(home.app_toml()).unwrap(), app);
        assert_eq!(detect_current(&home).unwrap(), NodeRole::FullNode);
    }

    #[test]
    fn test_default_template_detects_as_full_node_with_issues() {
        let (_dir, home) = home();
        assert_eq!(detect_current(&home).unwrap(), NodeRole::FullNode);
        assert!(!validate(&home, NodeRole::FullNode, None).unwrap().is_clean());
    }
}
