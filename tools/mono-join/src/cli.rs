//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use mono_02_network_registry::{NetworkName, NetworkRegistry, RegistryError};
use mono_06_role_applier::NodeRole;
use mono_09_join_pipeline::{JoinOptions, OpsConfig};
use shared_types::SyncMode;

/// Mono-Ops: join a node to a Mono network and keep its config canonical.
#[derive(Parser, Debug)]
#[command(name = "mono-join", version)]
#[command(about = "Join a node home to a Mono network and keep its configuration canonical")]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, env = "MONO_LOG", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Base URL of the canonical manifest repository
    #[arg(long, global = true, env = "MONO_CANONICAL_BASE")]
    pub canonical_base: Option<String>,

    /// Git ref the canonical manifests are pinned to
    #[arg(long, global = true, env = "MONO_NETWORKS_REF")]
    pub networks_ref: Option<String>,

    /// Tool config directory holding the manifest cache
    #[arg(long, global = true, env = "MONO_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Timeout for manifest and peer registry downloads, in seconds
    #[arg(long, global = true, env = "MONO_FETCH_TIMEOUT_SECS")]
    pub fetch_timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Overlay the flags given on the command line onto `config`.
    pub fn apply_to(&self, config: &mut OpsConfig) {
        if let Some(base) = &self.canonical_base {
            config.canonical_base = base.clone();
        }
        if let Some(git_ref) = &self.networks_ref {
            config.git_ref = git_ref.clone();
        }
        if let Some(dir) = &self.config_dir {
            config.config_dir = Some(dir.clone());
        }
        if let Some(secs) = self.fetch_timeout_secs {
            config.metadata_timeout = Duration::from_secs(secs);
        }
        if let Command::Join(args) = &self.command {
            if let Some(binary) = &args.node_binary {
                config.node_binary = Some(binary.clone());
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Join a node home to a network
    Join(JoinArgs),

    /// Report config fields that differ from the canonical manifest
    Drift(TargetArgs),

    /// Rewrite drifted config fields to their canonical values
    Repair {
        #[command(flatten)]
        target: TargetArgs,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect or apply a node role
    Role {
        #[command(subcommand)]
        action: RoleCommand,
    },

    /// List the built-in networks
    Networks,
}

fn parse_network(input: &str) -> Result<NetworkName, RegistryError> {
    NetworkRegistry::embedded().parse_name(input)
}

#[derive(Args, Debug, Clone)]
pub struct HomeArg {
    /// Node home directory
    #[arg(long, env = "MONO_HOME")]
    pub home: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Network the home belongs to (name or chain-id)
    #[arg(long, short, value_parser = parse_network)]
    pub network: NetworkName,

    #[command(flatten)]
    pub home: HomeArg,

    /// Sync mode the home was joined with; inferred from `pex` when omitted
    #[arg(long)]
    pub sync_mode: Option<SyncMode>,
}

#[derive(Args, Debug, Clone)]
pub struct JoinArgs {
    /// Network to join (Localnet, Sprintnet, Testnet, Mainnet, or a chain-id)
    #[arg(long, short, value_parser = parse_network)]
    pub network: NetworkName,

    #[command(flatten)]
    pub home: HomeArg,

    /// Node moniker; derived from the hostname when omitted
    #[arg(long)]
    pub moniker: Option<String>,

    /// Download genesis from this URL instead of the network's
    #[arg(long)]
    pub genesis_url: Option<String>,

    /// Expected SHA-256 of the genesis file
    #[arg(long)]
    pub genesis_sha256: Option<String>,

    /// Fetch the peer registry from this URL instead of the network's
    #[arg(long)]
    pub peers_url: Option<String>,

    /// Do not fetch the peer registry
    #[arg(long)]
    pub no_peer_registry: bool,

    /// Sync mode: default, bootstrap or statesync
    #[arg(long, default_value = "default")]
    pub sync_mode: SyncMode,

    /// Remove addrbook.json even in default sync mode
    #[arg(long)]
    pub clear_addrbook: bool,

    /// Leave external_address alone
    #[arg(long)]
    pub no_external_address: bool,

    /// Node binary to run `init` with
    #[arg(long, env = "MONO_NODE_BINARY")]
    pub node_binary: Option<PathBuf>,

    /// Report every step without touching the home
    #[arg(long)]
    pub dry_run: bool,
}

impl JoinArgs {
    pub fn options(&self) -> JoinOptions {
        JoinOptions {
            moniker: self.moniker.clone(),
            genesis_url: self.genesis_url.clone(),
            genesis_sha256: self.genesis_sha256.clone(),
            peers_url: self.peers_url.clone(),
            use_peer_registry: !self.no_peer_registry,
            sync_mode: self.sync_mode,
            clear_addrbook: self.clear_addrbook,
            detect_external_address: !self.no_external_address,
            dry_run: self.dry_run,
            ..JoinOptions::new(self.network, self.home.home.clone())
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RoleCommand {
    /// Check the home's settings against a role
    Validate {
        #[command(flatten)]
        home: HomeArg,

        /// full_node, archive_node or seed_node
        #[arg(long)]
        role: NodeRole,

        /// Earliest block height the node serves
        #[arg(long)]
        earliest_height: Option<u64>,
    },

    /// Write a role's seed_mode and pruning settings
    Apply {
        #[command(flatten)]
        home: HomeArg,

        #[arg(long)]
        role: NodeRole,

        #[arg(long)]
        dry_run: bool,
    },

    /// Infer the role from the home's settings
    Detect {
        #[command(flatten)]
        home: HomeArg,
    },
}
