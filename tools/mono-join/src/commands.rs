//! Subcommand dispatch.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use mono_02_network_registry::{CanonicalResolver, NetworkName, NetworkRegistry};
use mono_06_role_applier as roles;
use mono_07_drift_repair::{detect_drift, infer_sync_mode, repair, ExpectedConfig};
use mono_09_join_pipeline::{JoinOptions, JoinPipeline, NodeInitializer, OpsConfig, SubprocessInitializer};
use shared_types::{HttpFetcher, NodeHome, ReqwestFetcher, SyncMode};
use tracing::{info, warn};

use crate::cli::{Cli, Command, RoleCommand, TargetArgs};
use crate::render;

pub fn run(cli: &Cli) -> Result<ExitCode> {
    let mut config = OpsConfig::from_env();
    cli.apply_to(&mut config);
    config.validate().context("invalid configuration")?;

    match &cli.command {
        Command::Join(args) => {
            let fetcher = ReqwestFetcher::new()?;
            let initializer = SubprocessInitializer::new(config.node_binary.clone());
            let pipeline = JoinPipeline::new(fetcher, initializer, config);
            join(&pipeline, &args.options(), cli.json)
        }
        Command::Drift(target) => {
            let home = NodeHome::new(&target.home.home);
            let mode = target_sync_mode(target, &home)?;
            let expected = expected_config(&ReqwestFetcher::new()?, &config, target.network, mode)?;
            drift(&home, &expected, cli.json)
        }
        Command::Repair { target, dry_run } => {
            let home = NodeHome::new(&target.home.home);
            let mode = target_sync_mode(target, &home)?;
            let expected = expected_config(&ReqwestFetcher::new()?, &config, target.network, mode)?;
            let results = repair(&home, &expected, *dry_run);
            emit(cli.json, &results, || render::repair_results(&results))?;
            Ok(if results.iter().all(|r| r.success) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Role { action } => role(action, cli.json),
        Command::Networks => {
            let registry = NetworkRegistry::embedded();
            if cli.json {
                println!("{}", render::networks_json(registry.list())?);
            } else {
                print!("{}", render::networks(registry.list()));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Run the pipeline and print its report. A failed join is reported, not
/// returned as an error.
pub fn join<F: HttpFetcher, I: NodeInitializer>(
    pipeline: &JoinPipeline<F, I>,
    options: &JoinOptions,
    json: bool,
) -> Result<ExitCode> {
    info!(network = %options.network, home = %options.home.display(), dry_run = options.dry_run, "joining");
    match pipeline.run(options) {
        Ok(result) => {
            emit(json, &result, || render::join_report(&result))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            if json {
                println!("{}", render::join_failure_json(&failure)?);
            } else {
                print!("{}", render::join_report(&failure.result));
                eprint!("{}", render::join_failure(&failure));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn target_sync_mode(target: &TargetArgs, home: &NodeHome) -> Result<SyncMode> {
    match target.sync_mode {
        Some(mode) => Ok(mode),
        None => {
            let mode = infer_sync_mode(home).context("cannot infer sync mode from config.toml")?;
            info!(sync_mode = %mode, "inferred sync mode from pex");
            Ok(mode)
        }
    }
}

/// Canonical values for `network` joined in `mode`. Drift needs the
/// manifest's peer lists, so the embedded record alone is not enough.
pub fn expected_config<F: HttpFetcher>(
    fetcher: &F,
    config: &OpsConfig,
    network: NetworkName,
    mode: SyncMode,
) -> Result<ExpectedConfig> {
    let mut resolver =
        CanonicalResolver::new(fetcher, config.canonical_base.clone()).with_timeout(config.metadata_timeout);
    if let Some(cache) = config.cache() {
        resolver = resolver.with_cache(cache);
    }
    let resolution = resolver.resolve(network, &config.git_ref)?;
    match resolution.manifest {
        Some(manifest) => Ok(ExpectedConfig::from_manifest(&manifest, mode)),
        None => bail!(
            "no canonical manifest available for {network} (source: {}); cannot determine expected peers",
            resolution.source.as_str()
        ),
    }
}

fn drift(home: &NodeHome, expected: &ExpectedConfig, json: bool) -> Result<ExitCode> {
    let report = detect_drift(home, expected)?;
    if report.has_critical() {
        warn!(findings = report.findings.len(), "critical drift detected");
    }
    emit(json, &report, || render::drift_report(&report))?;
    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn role(action: &RoleCommand, json: bool) -> Result<ExitCode> {
    match action {
        RoleCommand::Validate {
            home,
            role,
            earliest_height,
        } => {
            let result = roles::validate(&NodeHome::new(&home.home), *role, *earliest_height)?;
            emit(json, &result, || render::validation(&result))?;
            Ok(if result.has_critical() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        RoleCommand::Apply { home, role, dry_run } => {
            let result = roles::apply(&NodeHome::new(&home.home), *role, *dry_run)?;
            if json {
                let summary = serde_json::json!({
                    "role": result.role,
                    "dry_run": dry_run,
                    "config_toml_changed": result.config_toml.applied.iter().filter(|a| a.changed()).count(),
                    "app_toml_changed": result.app_toml.applied.iter().filter(|a| a.changed()).count(),
                });
                println!("{}", render::to_json(&summary)?);
            } else {
                print!("{}", render::role_applied(&result, *dry_run));
            }
            Ok(ExitCode::SUCCESS)
        }
        RoleCommand::Detect { home } => {
            let role = roles::detect_current(&NodeHome::new(&home.home))?;
            if json {
                println!("{}", render::to_json(&serde_json::json!({ "role": role }))?);
            } else {
                println!("{role}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn emit<T: serde::Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", render::to_json(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}
