//! Registry retrieval: fetch through the HTTP port, then parse.

use std::time::Duration;

use shared_types::HttpFetcher;
use tracing::{debug, info};

use crate::domain::{PeersError, PeersRegistry};

/// Download and parse the peer registry at `url`.
pub fn fetch_registry<F: HttpFetcher>(
    fetcher: &F,
    url: &str,
    timeout: Duration,
) -> Result<PeersRegistry, PeersError> {
    debug!(url, ?timeout, "fetching peer registry");
    let body = fetcher.get(url, timeout)?;
    let registry = PeersRegistry::parse(&body)?;
    info!(
        url,
        chain_id = %registry.chain_id,
        seeds = registry.seeds.len(),
        persistent = registry.persistent_peers.len(),
        bootstrap = registry.bootstrap_peers.len(),
        "peer registry loaded"
    );
    Ok(registry)
}
