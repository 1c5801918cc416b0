//! # Canonical Resolution
//!
//! Resolves a [`NetworkName`] to a [`Network`] record.
//!
//! Order: canonical manifest at a pinned git ref, then the on-disk cache,
//! then the embedded table. Localnet always resolves from the embedded
//! table. A Localnet-leak is fatal wherever it is found and never falls
//! through to the next source.

use std::time::Duration;

use shared_types::{HttpFetcher, METADATA_FETCH_TIMEOUT};
use tracing::{debug, info, warn};

use crate::adapters::NetworkCache;
use crate::domain::{
    guard_localnet, Network, NetworkConfig, NetworkName, NetworkRegistry, RegistryError,
};

/// Base URL of the repository publishing canonical manifests.
pub const DEFAULT_CANONICAL_BASE: &str = "https://raw.githubusercontent.com/mono-chain/networks";

/// Git ref used when none is configured.
pub const DEFAULT_GIT_REF: &str = "main";

/// `<base>/<ref>/networks/<slug>.json`
pub fn manifest_url(base: &str, git_ref: &str, name: NetworkName) -> String {
    format!(
        "{}/{}/networks/{}.json",
        base.trim_end_matches('/'),
        git_ref.trim_matches('/'),
        name.slug()
    )
}

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Remote,
    Cache,
    Embedded,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Cache => "cache",
            Self::Embedded => "embedded",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub network: Network,
    /// The verified manifest, when one was used.
    pub manifest: Option<NetworkConfig>,
    pub source: ResolutionSource,
}

/// Resolves networks through an [`HttpFetcher`] with cache and embedded fallback.
pub struct CanonicalResolver<F: HttpFetcher> {
    fetcher: F,
    base_url: String,
    cache: Option<NetworkCache>,
    registry: NetworkRegistry,
    timeout: Duration,
}

impl<F: HttpFetcher> CanonicalResolver<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            cache: None,
            registry: NetworkRegistry::embedded(),
            timeout: METADATA_FETCH_TIMEOUT,
        }
    }

    /// Per-request timeout for manifest downloads.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: NetworkCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: NetworkRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Resolve and return only the network record.
    pub fn resolve_canonical(
        &self,
        name: NetworkName,
        git_ref: &str,
    ) -> Result<Network, RegistryError> {
        self.resolve(name, git_ref).map(|r| r.network)
    }

    pub fn resolve(&self, name: NetworkName, git_ref: &str) -> Result<Resolution, RegistryError> {
        let embedded = self.registry.get(name)?;

        if name == NetworkName::Localnet {
            debug!(network = %name, "localnet resolves from the embedded table");
            return Ok(Resolution {
                network: embedded.clone(),
                manifest: None,
                source: ResolutionSource::Embedded,
            });
        }

        let resolution = match self.resolve_remote(name, git_ref, embedded) {
            Ok(resolution) => resolution,
            Err(e @ RegistryError::LocalnetLeak { .. }) => return Err(e),
            Err(e) => {
                warn!(network = %name, git_ref, error = %e, "canonical manifest unavailable");
                match self.resolve_cached(name, git_ref, embedded)? {
                    Some(resolution) => resolution,
                    None => {
                        warn!(network = %name, "falling back to the embedded network record");
                        Resolution {
                            network: embedded.clone(),
                            manifest: None,
                            source: ResolutionSource::Embedded,
                        }
                    }
                }
            }
        };

        guard_localnet(&resolution.network)?;
        info!(
            network = %name,
            chain_id = %resolution.network.chain_id,
            evm_chain_id = resolution.network.evm_chain_id,
            source = resolution.source.as_str(),
            "network resolved"
        );
        Ok(resolution)
    }

    fn resolve_remote(
        &self,
        name: NetworkName,
        git_ref: &str,
        embedded: &Network,
    ) -> Result<Resolution, RegistryError> {
        let url = manifest_url(&self.base_url, git_ref, name);
        debug!(url = %url, "fetching canonical manifest");

        let body = self.fetcher.get(&url, self.timeout)?;
        let manifest = NetworkConfig::from_json(&body)?;
        manifest.verify(name)?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(name, git_ref, &body, &url) {
                warn!(network = %name, error = %e, "could not write manifest cache");
            }
        }

        Ok(Resolution {
            network: manifest.to_network(embedded),
            manifest: Some(manifest),
            source: ResolutionSource::Remote,
        })
    }

    fn resolve_cached(
        &self,
        name: NetworkName,
        git_ref: &str,
        embedded: &Network,
    ) -> Result<Option<Resolution>, RegistryError> {
        let Some(cache) = &self.cache else {
            return Ok(None);
        };

        let cached = match cache.load(name, git_ref) {
            Ok(Some(cached)) => cached,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(network = %name, error = %e, "ignoring unreadable manifest cache");
                return Ok(None);
            }
        };

        match cached.config.verify(name) {
            Ok(()) => {}
            Err(e @ RegistryError::LocalnetLeak { .. }) => return Err(e),
            Err(e) => {
                warn!(network = %name, error = %e, "ignoring invalid cached manifest");
                return Ok(None);
            }
        }

        if let Some(meta) = &cached.meta {
            info!(
                network = %name,
                fetched_at = %meta.fetched_at,
                "using cached canonical manifest"
            );
        }

        Ok(Some(Resolution {
            network: cached.config.to_network(embedded),
            manifest: Some(cached.config),
            source: ResolutionSource::Cache,
        }))
    }
}
