//! # Join Pipeline Service
//!
//! Runs the fourteen join steps in order on the caller's thread. Every
//! step records its outcome; the first fatal error ends the run, and the
//! steps after it are reported as pending.
//!
//! Nothing touches the home before preflight passes. Under dry-run no step
//! writes, and each mutating step reports what it would have done.

use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;

use mono_01_peer_registry::{fetch_registry, PeersError, PeersRegistry};
use mono_02_network_registry::{CanonicalResolver, Network, NetworkCache, Resolution};
use mono_04_toml_patcher::{
    apply_config_patch, set_client_chain_id, set_evm_chain_id, set_external_address,
};
use mono_08_external_address::{external_address_value, AddressDetector};
use shared_types::{HttpFetcher, NodeHome, SyncMode, DEFAULT_P2P_PORT};
use tracing::{info, warn};

use crate::config::OpsConfig;
use crate::domain::step::{
    STEP_APPLY_CONFIG, STEP_CLEAR_ADDRBOOK, STEP_CLIENT_CHAIN_ID, STEP_DOWNLOAD_GENESIS, STEP_EVM_CHAIN_ID,
    STEP_EXTERNAL_ADDRESS, STEP_FETCH_PEERS, STEP_INIT_NODE, STEP_PREFLIGHT, STEP_RESOLVE_NETWORK,
    STEP_SELECT_PEERS, STEP_VALIDATE_GENESIS, STEP_VERIFY_SHA256, STEP_WRITE_GENESIS,
};
use crate::domain::{
    derive_moniker, select_sync_peers, JoinError, JoinFailure, JoinOptions, JoinResult,
    PeerCandidates, StepStatus,
};
use crate::ports::NodeInitializer;

const DRY_RUN: &str = "(dry-run)";

/// The join pipeline over an HTTP port and a node initializer.
pub struct JoinPipeline<F: HttpFetcher, I: NodeInitializer> {
    fetcher: F,
    initializer: I,
    config: OpsConfig,
    cache: Option<NetworkCache>,
}

impl<F: HttpFetcher, I: NodeInitializer> JoinPipeline<F, I> {
    pub fn new(fetcher: F, initializer: I, config: OpsConfig) -> Self {
        let cache = config.cache();
        Self {
            fetcher,
            initializer,
            config,
            cache,
        }
    }

    /// Replace the manifest cache (`None` disables it).
    #[must_use]
    pub fn with_cache(mut self, cache: Option<NetworkCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &OpsConfig {
        &self.config
    }

    pub fn run(&self, options: &JoinOptions) -> Result<JoinResult, JoinFailure> {
        let mut run = Run::new(options);
        match self.steps(options, &mut run) {
            Ok(()) => {
                run.result.success = true;
                info!(
                    network = %options.network,
                    chain_id = run.result.chain_id.as_deref().unwrap_or(""),
                    dry_run = options.dry_run,
                    warnings = run.result.warnings.len(),
                    "join complete"
                );
                Ok(run.result)
            }
            Err((step, error)) => {
                warn!(step, error = %error, "join failed");
                run.result.record(step, StepStatus::Failed, error.to_string());
                run.result.pad_pending();
                Err(JoinFailure {
                    result: run.result,
                    error,
                })
            }
        }
    }

    fn steps(&self, options: &JoinOptions, run: &mut Run) -> Result<(), (&'static str, JoinError)> {
        let home = NodeHome::new(&options.home);
        let dry_run = options.dry_run;

        // 1. Resolve network
        let resolution = self
            .resolve(options)
            .map_err(|e| (STEP_RESOLVE_NETWORK, e))?;
        let network = resolution.network.clone();
        run.result.network = Some(network.name.to_string());
        run.result.chain_id = Some(network.chain_id.clone());
        run.result.evm_chain_id = Some(network.evm_chain_id);
        run.success(
            STEP_RESOLVE_NETWORK,
            format!(
                "{} (chain-id={}, evm-chain-id={}, source={})",
                network.name,
                network.chain_id,
                network.evm_chain_id,
                resolution.source.as_str()
            ),
        );

        // 2. Download genesis
        let genesis_url = options
            .genesis_url
            .clone()
            .unwrap_or_else(|| network.genesis_url.clone());
        let genesis = mono_03_genesis::fetch(&self.fetcher, &genesis_url, self.config.genesis_timeout)
            .map_err(|e| (STEP_DOWNLOAD_GENESIS, JoinError::from(e)))?;
        run.success(STEP_DOWNLOAD_GENESIS, format!("{} bytes from {genesis_url}", genesis.len()));

        // 3. Validate genesis
        let chain_id = mono_03_genesis::validate_chain_id(&genesis, &network.chain_id)
            .map_err(|e| (STEP_VALIDATE_GENESIS, JoinError::from(e)))?;
        run.success(STEP_VALIDATE_GENESIS, format!("chain-id={chain_id}"));

        // 4. Preflight checks
        let report = mono_05_preflight::run(&home, &chain_id).map_err(|e| (STEP_PREFLIGHT, JoinError::from(e)))?;
        run.result.warnings.extend(report.warnings);
        run.success(
            STEP_PREFLIGHT,
            if report.initialized {
                "home already initialized for this chain"
            } else {
                "home is clean"
            },
        );

        // 5. Initialize node
        self.initialize(options, &home, &chain_id, run)
            .map_err(|e| (STEP_INIT_NODE, e))?;

        // 6. Fetch peer registry
        let registry = self.fetch_peers(options, &network, &chain_id, run).map_err(|e| (STEP_FETCH_PEERS, e))?;

        // 7. Select sync peers
        let mut candidates = match &resolution.manifest {
            Some(manifest) => PeerCandidates::from_manifest(manifest),
            None => PeerCandidates::from_seed_strings(&network.seeds),
        };
        if let Some(registry) = &registry {
            candidates.absorb_registry(registry);
        }
        let selection =
            select_sync_peers(&candidates, options.sync_mode).map_err(|e| (STEP_SELECT_PEERS, e))?;
        let mut summary = selection.summary.clone();
        if options.sync_mode == SyncMode::Statesync {
            let trusted = registry.as_ref().map_or(0, |r| r.trusted_rpc_endpoints.len());
            summary.push_str(&format!(", {trusted} trusted RPC endpoints"));
        }
        if let Some(warning) = selection.warning.clone() {
            run.warn(warning);
        }
        run.success(STEP_SELECT_PEERS, summary);

        // 8. Verify SHA256
        let expected_digest = options
            .genesis_sha256
            .clone()
            .or_else(|| registry.as_ref().and_then(|r| r.genesis_sha256.clone()))
            .or_else(|| resolution.manifest.as_ref().and_then(|m| m.genesis_sha256.clone()))
            .filter(|d| !d.trim().is_empty());
        match expected_digest {
            Some(expected) => {
                let digest = mono_03_genesis::verify_bytes_digest(&genesis, &expected)
                    .map_err(|e| (STEP_VERIFY_SHA256, JoinError::from(e)))?;
                run.success(STEP_VERIFY_SHA256, format!("sha256={digest}"));
            }
            None => {
                run.warn("no genesis digest supplied or published; genesis integrity not verified");
                run.skipped(STEP_VERIFY_SHA256, "no expected digest");
            }
        }

        // 9. Write genesis
        let path = mono_03_genesis::write(&home, &genesis, dry_run)
            .map_err(|e| (STEP_WRITE_GENESIS, JoinError::from(e)))?;
        run.result.genesis_path = Some(path.clone());
        run.wrote(STEP_WRITE_GENESIS, path, dry_run);

        // 10. Clear address book
        self.clear_addrbook(options, &home, run)
            .map_err(|e| (STEP_CLEAR_ADDRBOOK, e))?;

        // 11. Apply config
        patch_step(run, STEP_APPLY_CONFIG, home.config_toml(), dry_run, |path| {
            apply_config_patch(&home, &selection.patch, dry_run)?;
            Ok(path)
        })?;

        // 12. Set client chain-id
        patch_step(run, STEP_CLIENT_CHAIN_ID, home.client_toml(), dry_run, |path| {
            set_client_chain_id(&home, &chain_id, dry_run)?;
            Ok(path)
        })?;

        // 13. Set EVM chain-id
        if network.evm_chain_id == 0 {
            run.skipped(STEP_EVM_CHAIN_ID, "network has no EVM chain-id");
        } else {
            patch_step(run, STEP_EVM_CHAIN_ID, home.app_toml(), dry_run, |path| {
                set_evm_chain_id(&home, network.evm_chain_id, dry_run)?;
                Ok(path)
            })?;
        }

        // 14. Detect external address
        self.external_address(options, &home, run);

        Ok(())
    }

    fn resolve(&self, options: &JoinOptions) -> Result<Resolution, JoinError> {
        let mut resolver = CanonicalResolver::new(&self.fetcher, self.config.canonical_base.clone())
            .with_timeout(self.config.metadata_timeout);
        if let Some(cache) = &self.cache {
            resolver = resolver.with_cache(cache.clone());
        }
        Ok(resolver.resolve(options.network, &self.config.git_ref)?)
    }

    fn initialize(
        &self,
        options: &JoinOptions,
        home: &NodeHome,
        chain_id: &str,
        run: &mut Run,
    ) -> Result<(), JoinError> {
        if home.is_initialized() {
            run.skipped(STEP_INIT_NODE, "home already initialized");
            return Ok(());
        }

        let moniker = derive_moniker(options.moniker.as_deref());
        if options.dry_run {
            let command = self.initializer.describe(home, &moniker, chain_id);
            run.success(STEP_INIT_NODE, format!("would run `{command}` {DRY_RUN}"));
            return Ok(());
        }

        let output = self.initializer.init(home, &moniker, chain_id)?;
        run.result.node_id = output.node_id.clone();
        run.result.paths_written.push(home.config_dir());
        run.success(
            STEP_INIT_NODE,
            format!(
                "moniker={moniker}, node-id={}",
                output.node_id.as_deref().unwrap_or("unknown")
            ),
        );
        Ok(())
    }

    fn fetch_peers(
        &self,
        options: &JoinOptions,
        network: &Network,
        chain_id: &str,
        run: &mut Run,
    ) -> Result<Option<PeersRegistry>, JoinError> {
        if !options.use_peer_registry {
            run.skipped(STEP_FETCH_PEERS, "peer registry disabled");
            return Ok(None);
        }

        let url = options.peers_url.as_deref().unwrap_or(&network.peers_url);
        let timeout = self.config.metadata_timeout;
        let fetched = match fetch_registry(&self.fetcher, url, timeout) {
            Err(PeersError::Fetch(e)) if e.is_not_found() && url != network.peers_url => {
                warn!(url, fallback = %network.peers_url, "peer registry override not found, retrying network URL");
                fetch_registry(&self.fetcher, &network.peers_url, timeout)
            }
            other => other,
        };

        let registry = match fetched {
            Ok(registry) => registry,
            Err(PeersError::Fetch(e)) => {
                run.warn(format!("peer registry unavailable: {e}"));
                run.skipped(STEP_FETCH_PEERS, "peer registry unavailable; continuing without it");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if registry.chain_id != chain_id {
            run.warn(format!(
                "peer registry is for chain-id '{}', expected '{chain_id}'; ignoring it",
                registry.chain_id
            ));
            run.skipped(STEP_FETCH_PEERS, "peer registry chain-id mismatch");
            return Ok(None);
        }

        run.success(
            STEP_FETCH_PEERS,
            format!(
                "{} seeds, {} persistent, {} bootstrap",
                registry.seeds.len(),
                registry.all_persistent().len(),
                registry.bootstrap_peers.len()
            ),
        );
        Ok(Some(registry))
    }

    fn clear_addrbook(&self, options: &JoinOptions, home: &NodeHome, run: &mut Run) -> Result<(), JoinError> {
        let wanted = options.clear_addrbook || options.sync_mode != SyncMode::Default;
        if !wanted {
            run.skipped(STEP_CLEAR_ADDRBOOK, "not requested");
            return Ok(());
        }

        let path = home.addrbook_json();
        if !path.exists() {
            run.skipped(STEP_CLEAR_ADDRBOOK, "no address book present");
            return Ok(());
        }
        if options.dry_run {
            run.success(STEP_CLEAR_ADDRBOOK, format!("would remove {} {DRY_RUN}", path.display()));
            return Ok(());
        }

        fs::remove_file(&path).map_err(|source| JoinError::Io {
            path: path.display().to_string(),
            source,
        })?;
        run.success(STEP_CLEAR_ADDRBOOK, format!("removed {}", path.display()));
        Ok(())
    }

    fn external_address(&self, options: &JoinOptions, home: &NodeHome, run: &mut Run) {
        if !options.detect_external_address {
            run.skipped(STEP_EXTERNAL_ADDRESS, "detection disabled");
            return;
        }

        let detector = AddressDetector::new(&self.fetcher)
            .with_endpoints(self.config.address_endpoints.clone())
            .with_timeout(self.config.address_probe_timeout);
        let Some(ip) = detector.detect() else {
            run.warn("public address not detected; external_address left unchanged");
            run.skipped(STEP_EXTERNAL_ADDRESS, "no public address detected");
            return;
        };

        let value = external_address_value(&ip, DEFAULT_P2P_PORT);
        match self.write_external_address(home, &ip, &value, options.dry_run) {
            Ok(message) => run.success(STEP_EXTERNAL_ADDRESS, message),
            Err(e) => {
                run.warn(format!("could not set external_address: {e}"));
                run.skipped(STEP_EXTERNAL_ADDRESS, format!("detected {ip}, not written"));
            }
        }
    }

    fn write_external_address(
        &self,
        home: &NodeHome,
        ip: &IpAddr,
        value: &str,
        dry_run: bool,
    ) -> Result<String, JoinError> {
        if dry_run {
            return Ok(format!("{ip}: would set external_address = \"{value}\" {DRY_RUN}"));
        }
        set_external_address(home, value, false)?;
        Ok(format!("external_address = \"{value}\""))
    }
}

/// Per-run mutable state.
struct Run {
    result: JoinResult,
}

impl Run {
    fn new(options: &JoinOptions) -> Self {
        Self {
            result: JoinResult {
                dry_run: options.dry_run,
                ..JoinResult::default()
            },
        }
    }

    fn success(&mut self, step: &'static str, message: impl Into<String>) {
        self.result.record(step, StepStatus::Success, message);
    }

    fn skipped(&mut self, step: &'static str, message: impl Into<String>) {
        self.result.record(step, StepStatus::Skipped, message);
    }

    fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.result.warnings.push(message);
    }

    /// Record a file-writing step.
    fn wrote(&mut self, step: &'static str, path: PathBuf, dry_run: bool) {
        let message = if dry_run {
            format!("would write {} {DRY_RUN}", path.display())
        } else {
            format!("wrote {}", path.display())
        };
        self.result.paths_written.push(path);
        self.success(step, message);
    }
}

/// Run a config patch step. Under dry-run a file that does not exist yet
/// (fresh home, init skipped) is reported without being read.
fn patch_step(
    run: &mut Run,
    step: &'static str,
    path: PathBuf,
    dry_run: bool,
    patch: impl FnOnce(PathBuf) -> Result<PathBuf, JoinError>,
) -> Result<(), (&'static str, JoinError)> {
    if dry_run && !path.exists() {
        run.wrote(step, path, true);
        return Ok(());
    }
    let path = patch(path).map_err(|e| (step, e))?;
    run.wrote(step, path, dry_run);
    Ok(())
}
