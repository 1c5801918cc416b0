//! # Node Home Layout
//!
//! ```text
//! <home>/
//! ├── config/
//! │   ├── app.toml
//! │   ├── client.toml
//! │   ├── config.toml
//! │   ├── genesis.json
//! │   └── addrbook.json
//! └── data/
//!     ├── state.db/  application.db/  blockstore.db/
//!     ├── tx_index.db/  evidence.db/  snapshots/
//!     └── priv_validator_state.json
//! ```
//!
//! The node binary creates this tree during `init`. The core mutates it but
//! never deletes it.

use std::path::{Path, PathBuf};

/// Entries under `data/` whose presence marks a home as dirty.
///
/// `priv_validator_state.json` is absent on purpose: clean validator homes
/// carry it.
pub const DIRTY_DATA_ENTRIES: [&str; 6] = [
    "state.db",
    "application.db",
    "blockstore.db",
    "tx_index.db",
    "evidence.db",
    "snapshots",
];

/// A node home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHome {
    root: PathBuf,
}

impl NodeHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    pub fn config_toml(&self) -> PathBuf {
        self.config_dir().join("config.toml")
    }

    pub fn app_toml(&self) -> PathBuf {
        self.config_dir().join("app.toml")
    }

    pub fn client_toml(&self) -> PathBuf {
        self.config_dir().join("client.toml")
    }

    pub fn genesis_json(&self) -> PathBuf {
        self.config_dir().join("genesis.json")
    }

    pub fn addrbook_json(&self) -> PathBuf {
        self.config_dir().join("addrbook.json")
    }

    /// A home counts as initialized once `config.toml` exists.
    pub fn is_initialized(&self) -> bool {
        self.config_toml().is_file()
    }

    /// Dirty entries present under `data/`, in probe order.
    pub fn dirty_data_entries(&self) -> Vec<&'static str> {
        let data = self.data_dir();
        if !data.is_dir() {
            return Vec::new();
        }
        DIRTY_DATA_ENTRIES
            .iter()
            .copied()
            .filter(|entry| data.join(entry).exists())
            .collect()
    }
}

impl From<&Path> for NodeHome {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_layout_paths() {
        let home = NodeHome::new("/var/lib/mono");
        assert_eq!(home.config_toml(), PathBuf::from("/var/lib/mono/config/config.toml"));
        assert_eq!(home.client_toml(), PathBuf::from("/var/lib/mono/config/client.toml"));
        assert_eq!(home.genesis_json(), PathBuf::from("/var/lib/mono/config/genesis.json"));
        assert_eq!(home.data_dir(), PathBuf::from("/var/lib/mono/data"));
    }

    #[test]
    fn test_dirty_entries_ignore_priv_validator_state() {
        let dir = tempfile::tempdir().unwrap();
        let home = NodeHome::new(dir.path());
        fs::create_dir_all(home.data_dir()).unwrap();
        fs::write(home.data_dir().join("priv_validator_state.json"), "{}").unwrap();
        assert!(home.dirty_data_entries().is_empty());

        fs::create_dir_all(home.data_dir().join("blockstore.db")).unwrap();
        fs::create_dir_all(home.data_dir().join("snapshots")).unwrap();
        assert_eq!(home.dirty_data_entries(), vec!["blockstore.db", "snapshots"]);
    }

    #[test]
    fn test_is_initialized_tracks_config_toml() {
        let dir = tempfile::tempdir().unwrap();
        let home = NodeHome::new(dir.path());
        assert!(!home.is_initialized());
        fs::create_dir_all(home.config_dir()).unwrap();
        fs::write(home.config_toml(), "").unwrap();
        assert!(home.is_initialized());
    }
}
