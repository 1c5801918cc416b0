//! On-disk manifest cache.
//!
//! Layout: `<root>/<network>/<ref>/{config.json, meta.json}` where `<root>`
//! defaults to `<user-config-dir>/networks`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::fs::{create_dir, write_file};

use crate::domain::{NetworkConfig, NetworkName, RegistryError};

const CONFIG_FILE: &str = "config.json";
const META_FILE: &str = "meta.json";

/// Resolve the tool's user config directory.
///
/// `MONO_CONFIG_DIR`, then `$XDG_CONFIG_HOME/mono-ops`, then
/// `$HOME/.config/mono-ops`.
pub fn user_config_dir() -> Option<PathBuf> {
    let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

    if let Some(dir) = non_empty("MONO_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("mono-ops"));
    }
    non_empty("HOME")
        .or_else(|| non_empty("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".config").join("mono-ops"))
}

/// Sidecar recording where and when a manifest was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMeta {
    pub fetched_at: DateTime<Utc>,
    pub git_ref: String,
    pub source_url: String,
}

#[derive(Debug, Clone)]
pub struct CachedManifest {
    pub config: NetworkConfig,
    /// Absent when the sidecar is missing or unreadable.
    pub meta: Option<CacheMeta>,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct NetworkCache {
    root: PathBuf,
}

impl NetworkCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache under the user config directory, if one can be determined.
    pub fn at_default_location() -> Option<Self> {
        user_config_dir().map(|dir| Self::new(dir.join("networks")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_dir(&self, name: NetworkName, git_ref: &str) -> PathBuf {
        self.root.join(name.slug()).join(flatten_ref(git_ref))
    }

    /// Persist a fetched manifest body and its metadata sidecar.
    pub fn store(
        &self,
        name: NetworkName,
        git_ref: &str,
        body: &[u8],
        source_url: &str,
    ) -> io::Result<PathBuf> {
        let dir = self.entry_dir(name, git_ref);
        create_dir(&dir)?;

        let config_path = dir.join(CONFIG_FILE);
        write_file(&config_path, body)?;

        let meta = CacheMeta {
            fetched_at: Utc::now(),
            git_ref: git_ref.to_string(),
            source_url: source_url.to_string(),
        };
        let meta_json = serde_json::to_vec_pretty(&meta)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        write_file(&dir.join(META_FILE), &meta_json)?;

        Ok(config_path)
    }

    /// Load a cached manifest. `Ok(None)` when nothing is cached.
    pub fn load(
        &self,
        name: NetworkName,
        git_ref: &str,
    ) -> Result<Option<CachedManifest>, RegistryError> {
        let dir = self.entry_dir(name, git_ref);
        let config_path = dir.join(CONFIG_FILE);

        let body = match fs::read(&config_path) {
            Ok(body) => body,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(RegistryError::Cache {
                    path: config_path.display().to_string(),
                    source,
                })
            }
        };

        let config = NetworkConfig::from_json(&body)?;
        let meta = fs::read(dir.join(META_FILE))
            .ok()
            .and_then(|m| serde_json::from_slice::<CacheMeta>(&m).ok());

        Ok(Some(CachedManifest {
            config,
            meta,
            path: config_path,
        }))
    }
}

fn flatten_ref(git_ref: &str) -> String {
    let flat: String = git_ref
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    if flat.is_empty() || flat == "." || flat == ".." {
        "_".to_string()
    } else {
        flat
    }
}
