//! Genesis retrieval and persistence.

use std::path::PathBuf;
use std::time::Duration;

use shared_types::fs::{create_dir, write_file};
use shared_types::{HttpFetcher, NodeHome};
use tracing::{debug, info};

use crate::domain::GenesisError;

/// Download the genesis document at `url`.
pub fn fetch<F: HttpFetcher>(
    fetcher: &F,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, GenesisError> {
    debug!(url, timeout_secs = timeout.as_secs(), "downloading genesis");
    let body = fetcher.get(url, timeout)?;
    info!(url, bytes = body.len(), "genesis downloaded");
    Ok(body)
}

/// Write `bytes` to `<home>/config/genesis.json`.
///
/// Under `dry_run` nothing is touched; the target path is still returned.
pub fn write(home: &NodeHome, bytes: &[u8], dry_run: bool) -> Result<PathBuf, GenesisError> {
    let path = home.genesis_json();
    if dry_run {
        debug!(path = %path.display(), "dry-run: genesis not written");
        return Ok(path);
    }

    let dir = home.config_dir();
    create_dir(&dir).map_err(|e| GenesisError::io(&dir, e))?;
    write_file(&path, bytes).map_err(|e| GenesisError::io(&path, e))?;

    info!(path = %path.display(), bytes = bytes.len(), "genesis written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{compute_digest, digest_bytes};
    use shared_types::{ErrorKind, MockFetcher, GENESIS_FETCH_TIMEOUT};

    const GENESIS: &[u8] = br#"{"chain_id":"mono-sprint-1"}"#;

    #[test]
    fn test_write_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let home = NodeHome::new(dir.path().join("home"));

        let path = write(&home, GENESIS, false).unwrap();

        assert_eq!(path, home.genesis_json());
        assert_eq!(std::fs::read(&path).unwrap(), GENESIS);
        assert_eq!(compute_digest(&path).unwrap(), digest_bytes(GENESIS));
    }

    #[test]
    fn test_dry_run_returns_path_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let home = NodeHome::new(dir.path().join("home"));

        let path = write(&home, GENESIS, true).unwrap();

        assert_eq!(path, home.genesis_json());
        assert!(!home.root().exists());
    }

    #[test]
    fn test_fetch_propagates_status() {
        let url = "https://networks.example.org/sprintnet/genesis.json";
        let fetcher = MockFetcher::new().with_status(url, 503);

        let err = fetch(&fetcher, url, GENESIS_FETCH_TIMEOUT).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);

        let fetcher = MockFetcher::new().with_body(url, GENESIS.to_vec());
        assert_eq!(fetch(&fetcher, url, GENESIS_FETCH_TIMEOUT).unwrap(), GENESIS);
    }
}
