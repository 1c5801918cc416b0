//! # Preflight
//!
//! Read-only checks that must pass before the join pipeline touches a home.
//!
//! 1. **Dirty data**: any of `state.db`, `application.db`, `blockstore.db`,
//!    `tx_index.db`, `evidence.db` or `snapshots` under `<home>/data`.
//!    A failed InitChain leaves these behind and the next start aborts with
//!    "invalid chain-id on InitChain".
//! 2. **Chain-id on disk**: an initialized home whose `genesis.json` names
//!    another chain.

mod errors;

use std::fs;

use shared_types::NodeHome;
use tracing::{debug, info, warn};

pub use errors::PreflightError;

/// What preflight learned about the home.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreflightReport {
    pub initialized: bool,
    /// Chain-id found in an existing `genesis.json`.
    pub existing_chain_id: Option<String>,
    pub warnings: Vec<String>,
}

/// Run both checks in order.
pub fn run(home: &NodeHome, expected_chain_id: &str) -> Result<PreflightReport, PreflightError> {
    check_dirty_data(home)?;
    let report = check_chain_id_on_disk(home, expected_chain_id)?;
    info!(
        home = %home.root().display(),
        initialized = report.initialized,
        "preflight passed"
    );
    Ok(report)
}

pub fn check_dirty_data(home: &NodeHome) -> Result<(), PreflightError> {
    let entries = home.dirty_data_entries();
    if entries.is_empty() {
        return Ok(());
    }
    Err(PreflightError::DirtyData {
        home: home.root().display().to_string(),
        entries: entries.into_iter().map(str::to_string).collect(),
    })
}

pub fn check_chain_id_on_disk(
    home: &NodeHome,
    expected_chain_id: &str,
) -> Result<PreflightReport, PreflightError> {
    let mut report = PreflightReport {
        initialized: home.is_initialized(),
        ..PreflightReport::default()
    };
    if !report.initialized {
        return Ok(report);
    }

    let path = home.genesis_json();
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable genesis on disk");
            return Ok(report);
        }
    };

    match mono_03_genesis::validate(&bytes) {
        Ok(actual) if actual != expected_chain_id => Err(PreflightError::ChainIdOnDiskMismatch {
            home: home.root().display().to_string(),
            expected: expected_chain_id.to_string(),
            actual,
        }),
        Ok(actual) => {
            report.existing_chain_id = Some(actual);
            Ok(report)
        }
        Err(e) => {
            let msg = format!("existing {} is unreadable and will be replaced: {e}", path.display());
            warn!("{msg}");
            report.warnings.push(msg);
            Ok(report)
        }
    }
}
