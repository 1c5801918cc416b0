//! # File Operations
//!
//! Write paths go through the line editor. Read paths use the `toml`
//! parser and never write back.

use std::fs;
use std::path::Path;

use shared_types::fs::write_file;
use shared_types::NodeHome;
use toml::{Table, Value};
use tracing::{debug, info};

use crate::domain::{apply_edits, ConfigPatch, PatchError, PatchOutcome, TomlEdit, TomlValue, P2P_SECTION};

/// How to treat keys that have no assignment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMode {
    /// Missing keys fail with `toml_key_missing` and nothing is written.
    Strict,
    /// Missing keys are reported in [`PatchOutcome::missing`].
    Lenient,
}

/// Apply `edits` to the file at `path`.
pub fn patch_file(
    path: &Path,
    edits: &[TomlEdit],
    mode: PatchMode,
    dry_run: bool,
) -> Result<PatchOutcome, PatchError> {
    let original = fs::read_to_string(path).map_err(|e| PatchError::io(path, e))?;
    let outcome = apply_edits(&original, edits);

    if mode == PatchMode::Strict {
        if let Some(missing) = outcome.missing.first() {
            return Err(PatchError::KeyMissing {
                file: path.display().to_string(),
                section: missing.section.clone(),
                key: missing.key.clone(),
            });
        }
    }

    if original.parse::<Table>().is_ok() {
        if let Err(e) = outcome.content.parse::<Table>() {
            return Err(PatchError::Corrupted {
                path: path.display().to_string(),
                reason: e.message().to_string(),
            });
        }
    }

    if dry_run {
        debug!(path = %path.display(), edits = outcome.applied.len(), "dry-run: patch not written");
    } else if outcome.content != original {
        write_file(path, outcome.content.as_bytes()).map_err(|e| PatchError::io(path, e))?;
        info!(path = %path.display(), edits = outcome.applied.len(), "config patched");
    }

    Ok(outcome)
}

// ============================================================================
// Read paths
// ============================================================================

fn read_table(path: &Path) -> Result<Table, PatchError> {
    let content = fs::read_to_string(path).map_err(|e| PatchError::io(path, e))?;
    content.parse::<Table>().map_err(|e| PatchError::Parse {
        path: path.display().to_string(),
        reason: e.message().to_string(),
    })
}

/// Whether the file parses as TOML.
pub fn validate_toml(path: &Path) -> Result<(), PatchError> {
    read_table(path).map(|_| ())
}

/// Look up `key` in `section` (dotted for nested tables, `""` for top level).
pub fn get_value(path: &Path, section: &str, key: &str) -> Result<Option<Value>, PatchError> {
    let table = read_table(path)?;
    Ok(lookup(&table, section, key).cloned())
}

/// [`get_value`] rendered as a plain string. Strings lose their quotes.
pub fn get_string(path: &Path, section: &str, key: &str) -> Result<Option<String>, PatchError> {
    Ok(get_value(path, section, key)?.map(|v| value_to_string(&v)))
}

pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}

fn lookup<'a>(table: &'a Table, section: &str, key: &str) -> Option<&'a Value> {
    let mut current = table;
    for part in section.split('.').filter(|p| !p.is_empty()) {
        current = current.get(part)?.as_table()?;
    }
    current.get(key)
}

// ============================================================================
// Call sites
// ============================================================================

/// `config.toml [p2p]`: seeds, persistent_peers and optionally pex.
pub fn apply_config_patch(
    home: &NodeHome,
    patch: &ConfigPatch,
    dry_run: bool,
) -> Result<PatchOutcome, PatchError> {
    patch_file(&home.config_toml(), &patch.edits(), PatchMode::Strict, dry_run)
}

/// `client.toml` top-level `chain-id`.
pub fn set_client_chain_id(
    home: &NodeHome,
    chain_id: &str,
    dry_run: bool,
) -> Result<PatchOutcome, PatchError> {
    let edit = TomlEdit::top_level("chain-id", TomlValue::str(chain_id));
    patch_file(&home.client_toml(), &[edit], PatchMode::Strict, dry_run)
}

/// `app.toml [evm] evm-chain-id`, unquoted.
pub fn set_evm_chain_id(
    home: &NodeHome,
    evm_chain_id: u64,
    dry_run: bool,
) -> Result<PatchOutcome, PatchError> {
    let edit = TomlEdit::new("evm", "evm-chain-id", TomlValue::Int(evm_chain_id));
    patch_file(&home.app_toml(), &[edit], PatchMode::Strict, dry_run)
}

/// `config.toml [p2p] external_address`.
pub fn set_external_address(
    home: &NodeHome,
    address: &str,
    dry_run: bool,
) -> Result<PatchOutcome, PatchError> {
    let edit = TomlEdit::new(P2P_SECTION, "external_address", TomlValue::str(address));
    patch_file(&home.config_toml(), &[edit], PatchMode::Strict, dry_run)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT_TOML: &str = "# client config\nchain-id = \"\"\nkeyring-backend = \"os\"\n";
    const APP_TOML: &str =
        "pruning = \"default\"\n\n[evm]\n# EVM chain id\nevm-chain-id = 262144\ntracer = \"\"\n";
    const CONFIG_TOML: &str = "moniker = \"n\"\n[p2p]\nexternal_address = \"\"\nseeds = \"\"\npersistent_peers = \"\"\npex = true\n";

    fn home_with_templates() -> (tempfile::TempDir, NodeHome) {
        let dir = tempfile::tempdir().unwrap();
        let home = NodeHome::new(dir.path());
        fs::create_dir_all(home.config_dir()).unwrap();
        fs::write(home.client_toml(), CLIENT_TOML).unwrap();
        fs::write(home.app_toml(), APP_TOML).unwrap();
        fs::write(home.config_toml(), CONFIG_TOML).unwrap();
        (dir, home)
    }

    #[test]
    fn test_client_chain_id_is_written() {
        let (_dir, home) = home_with_templates();

        set_client_chain_id(&home, "mono-sprint-1", false).unwrap();

        let client = fs::read_to_string(home.client_toml()).unwrap();
        assert!(client.contains("chain-id = \"mono-sprint-1\""));
        assert!(client.starts_with("# client config\n"));
        assert_eq!(
            get_string(&home.client_toml(), "", "chain-id").unwrap().as_deref(),
            Some("mono-sprint-1")
        );
    }

    #[test]
    fn test_evm_chain_id_is_unquoted() {
        let (_dir, home) = home_with_templates();

        set_evm_chain_id(&home, 262_146, false).unwrap();

        let app = fs::read_to_string(home.app_toml()).unwrap();
        assert!(app.contains("evm-chain-id = 262146\n"));
        assert_eq!(
            get_value(&home.app_toml(), "evm", "evm-chain-id").unwrap(),
            Some(Value::Integer(262_146))
        );
    }

    #[test]
    fn test_strict_missing_key_fails_without_writing() {
        let (_dir, home) = home_with_templates();
        fs::write(home.client_toml(), "keyring-backend = \"os\"\n").unwrap();

        let err = set_client_chain_id(&home, "mono-1", false).unwrap_err();

        assert_eq!(err.kind(), shared_types::ErrorKind::TomlKeyMissing);
        assert_eq!(
            fs::read_to_string(home.client_toml()).unwrap(),
            "keyring-backend = \"os\"\n"
        );
    }

    #[test]
    fn test_lenient_reports_missing() {
        let (_dir, home) = home_with_templates();
        let edits = [
            TomlEdit::new("p2p", "seeds", TomlValue::str("x")),
            TomlEdit::new("p2p", "unknown_key", TomlValue::str("y")),
        ];

        let out = patch_file(&home.config_toml(), &edits, PatchMode::Lenient, false).unwrap();

        assert_eq!(out.applied.len(), 1);
        assert_eq!(out.missing.len(), 1);
        assert_eq!(
            get_string(&home.config_toml(), "p2p", "seeds").unwrap().as_deref(),
            Some("x")
        );
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let (_dir, home) = home_with_templates();
        let patch = ConfigPatch {
            seeds: "a".into(),
            persistent_peers: "b".into(),
            pex: Some(false),
        };

        let out = apply_config_patch(&home, &patch, true).unwrap();

        assert_eq!(out.applied.len(), 3);
        assert_eq!(fs::read_to_string(home.config_toml()).unwrap(), CONFIG_TOML);
    }

    #[test]
    fn test_external_address_and_pex() {
        let (_dir, home) = home_with_templates();

        set_external_address(&home, "tcp://203.0.113.7:26656", false).unwrap();
        apply_config_patch(
            &home,
            &ConfigPatch {
                pex: Some(false),
                ..ConfigPatch::default()
            },
            false,
        )
        .unwrap();

        let path = home.config_toml();
        assert_eq!(
            get_string(&path, "p2p", "external_address").unwrap().as_deref(),
            Some("tcp://203.0.113.7:26656")
        );
        assert_eq!(get_value(&path, "p2p", "pex").unwrap(), Some(Value::Boolean(false)));
        assert_eq!(get_string(&path, "", "moniker").unwrap().as_deref(), Some("n"));
    }

    #[test]
    fn test_read_paths() {
        let (_dir, home) = home_with_templates();
        validate_toml(&home.app_toml()).unwrap();
        assert_eq!(get_value(&home.app_toml(), "evm", "missing").unwrap(), None);
        assert_eq!(get_value(&home.app_toml(), "nosuch", "x").unwrap(), None);

        fs::write(home.app_toml(), "pruning = ").unwrap();
        let err = validate_toml(&home.app_toml()).unwrap_err();
        assert_eq!(err.kind(), shared_types::ErrorKind::Schema);
    }
}
