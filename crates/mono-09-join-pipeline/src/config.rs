//! # Operator Configuration
//!
//! Built-in defaults, overridable from the environment:
//!
//! | Variable                  | Field             |
//! |---------------------------|-------------------|
//! | `MONO_CANONICAL_BASE`     | `canonical_base`  |
//! | `MONO_NETWORKS_REF`       | `git_ref`         |
//! | `MONO_CONFIG_DIR`         | `config_dir`      |
//! | `MONO_NODE_BINARY`        | `node_binary`     |
//! | `MONO_FETCH_TIMEOUT_SECS` | `metadata_timeout`|

use std::path::PathBuf;
use std::time::Duration;

use mono_02_network_registry::{NetworkCache, DEFAULT_CANONICAL_BASE, DEFAULT_GIT_REF};
use mono_08_external_address::DEFAULT_ENDPOINTS;
use shared_types::{ADDRESS_PROBE_TIMEOUT, GENESIS_FETCH_TIMEOUT, METADATA_FETCH_TIMEOUT};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpsConfig {
    /// Base URL of the canonical manifest repository.
    pub canonical_base: String,
    /// Git ref the manifests are pinned to.
    pub git_ref: String,
    /// Tool config directory; the manifest cache lives under `networks/`.
    pub config_dir: Option<PathBuf>,
    /// Explicit node binary, probed before any search path.
    pub node_binary: Option<PathBuf>,
    pub metadata_timeout: Duration,
    pub genesis_timeout: Duration,
    pub address_probe_timeout: Duration,
    /// Public-IP echo services, in probe order.
    pub address_endpoints: Vec<String>,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            canonical_base: DEFAULT_CANONICAL_BASE.to_string(),
            git_ref: DEFAULT_GIT_REF.to_string(),
            config_dir: None,
            node_binary: None,
            metadata_timeout: METADATA_FETCH_TIMEOUT,
            genesis_timeout: GENESIS_FETCH_TIMEOUT,
            address_probe_timeout: ADDRESS_PROBE_TIMEOUT,
            address_endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("canonical manifest base URL is empty")]
    EmptyBaseUrl,

    #[error("networks git ref is empty")]
    EmptyGitRef,

    #[error("{0} timeout must be greater than zero")]
    ZeroTimeout(&'static str),
}

impl OpsConfig {
    /// Defaults overlaid with `MONO_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`. Unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(base) = get("MONO_CANONICAL_BASE") {
            config.canonical_base = base;
        }
        if let Some(git_ref) = get("MONO_NETWORKS_REF") {
            info!(git_ref = %git_ref, "using networks ref from environment");
            config.git_ref = git_ref;
        }
        if let Some(dir) = get("MONO_CONFIG_DIR") {
            config.config_dir = Some(PathBuf::from(dir));
        }
        if let Some(binary) = get("MONO_NODE_BINARY") {
            config.node_binary = Some(PathBuf::from(binary));
        }
        if let Some(secs) = get("MONO_FETCH_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => config.metadata_timeout = Duration::from_secs(s),
                Err(_) => warn!(value = %secs, "MONO_FETCH_TIMEOUT_SECS is not a number of seconds, keeping default"),
            }
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canonical_base.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.git_ref.trim().is_empty() {
            return Err(ConfigError::EmptyGitRef);
        }
        for (name, timeout) in [
            ("metadata", self.metadata_timeout),
            ("genesis", self.genesis_timeout),
            ("address probe", self.address_probe_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ConfigError::ZeroTimeout(name));
            }
        }
        Ok(())
    }

    /// Manifest cache under `config_dir`, or under the default user config
    /// directory.
    pub fn cache(&self) -> Option<NetworkCache> {
        match &self.config_dir {
            Some(dir) => Some(NetworkCache::new(dir.join("networks"))),
            None => NetworkCache::at_default_location(),
        }
    }
}
