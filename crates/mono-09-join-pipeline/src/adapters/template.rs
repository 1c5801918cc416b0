//! Stand-in initializer that writes stock config templates.

use std::fs;
use std::sync::Mutex;

use shared_types::fs::{create_dir, write_file};
use shared_types::NodeHome;

use crate::domain::InitError;
use crate::ports::{InitOutput, NodeInitializer};

/// Node-id reported by [`TemplateInitializer`].
pub const TEMPLATE_NODE_ID: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";

pub const CONFIG_TOML_TEMPLATE: &str = r#"# This is a TOML config file.
# For more information, see https://github.com/toml-lang/toml

proxy_app = "tcp://127.0.0.1:26658"
moniker = "MONIKER"

#######################################################
###           P2P Configuration Options             ###
#######################################################
[p2p]

# Address to listen for incoming connections
laddr = "tcp://0.0.0.0:26656"

# Address to advertise to peers for them to dial
external_address = ""

# Comma separated list of seed nodes to connect to
seeds = ""

# Comma separated list of nodes to keep persistent connections to
persistent_peers = ""

# Maximum number of inbound peers
max_num_inbound_peers = 40

# Maximum number of outbound peers to connect to, excluding persistent peers
max_num_outbound_peers = 10

# Maximum number of connections (inbound and outbound) to persistent peers
experimental_max_gossip_connections_to_persistent_peers = 0

# Set true to enable the peer-exchange reactor
pex = true

# Seed mode, in which node constantly crawls the network and looks for
# peers. If another node asks it for addresses, it responds and disconnects.
seed_mode = false

#######################################################
###         Mempool Configuration Option            ###
#######################################################
[mempool]
size = 5000
"#;

pub const APP_TOML_TEMPLATE: &str = r#"# This is a TOML config file.

minimum-gas-prices = "0amono"

# default: the last 362880 states are kept, pruning at 10 block intervals
# nothing: all historic states will be saved, nothing will be deleted
# everything: 2 latest states will be kept; pruning at 10 block intervals
# custom: allow pruning options to be manually specified
pruning = "default"

# These are applied if and only if the pruning strategy is custom.
pruning-keep-recent = "0"
pruning-interval = "0"

###############################################################################
###                             EVM Configuration                           ###
###############################################################################
[evm]

# Tracer defines the 'vm.Tracer' type that the EVM will use when the node is run in
# debug mode.
tracer = ""

# EVM chain-id used for EIP-155 replay protection.
evm-chain-id = 262144
"#;

pub const CLIENT_TOML_TEMPLATE: &str = r#"# This is a TOML config file.

###############################################################################
###                           Client Configuration                            ###
###############################################################################

# The network chain ID
chain-id = ""
# The keyring's backend, where the keys are stored (os|file|kwallet|pass|test|memory)
keyring-backend = "os"
# CLI output format (text|json)
output = "text"
# <host>:<port> to CometBFT RPC interface for this chain
node = "tcp://localhost:26657"
# Transaction broadcasting mode (sync|async)
broadcast-mode = "sync"
"#;

/// Writes `config.toml`, `app.toml`, `client.toml` and a placeholder
/// genesis, like `init` does, and records every call.
#[derive(Debug, Default)]
pub struct TemplateInitializer {
    calls: Mutex<Vec<(String, String)>>,
}

impl TemplateInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(moniker, chain_id)` of each `init` call.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl NodeInitializer for TemplateInitializer {
    fn init(&self, home: &NodeHome, moniker: &str, chain_id: &str) -> Result<InitOutput, InitError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((moniker.to_string(), chain_id.to_string()));
        }

        let io = |source| InitError::Spawn {
            binary: "template".to_string(),
            source,
        };
        create_dir(&home.config_dir()).map_err(io)?;
        create_dir(&home.data_dir()).map_err(io)?;
        write_file(
            &home.config_toml(),
            CONFIG_TOML_TEMPLATE.replace("MONIKER", moniker).as_bytes(),
        )
        .map_err(io)?;
        write_file(&home.app_toml(), APP_TOML_TEMPLATE.as_bytes()).map_err(io)?;
        write_file(&home.client_toml(), CLIENT_TOML_TEMPLATE.as_bytes()).map_err(io)?;
        write_file(
            &home.genesis_json(),
            format!(r#"{{"chain_id":"{chain_id}","app_state":{{}}}}"#).as_bytes(),
        )
        .map_err(io)?;
        fs::write(home.data_dir().join("priv_validator_state.json"), b"{}").map_err(io)?;

        Ok(InitOutput {
            node_id: Some(TEMPLATE_NODE_ID.to_string()),
            output: format!(r#"{{"moniker":"{moniker}","chain_id":"{chain_id}","node_id":"{TEMPLATE_NODE_ID}"}}"#),
        })
    }

    fn describe(&self, home: &NodeHome, moniker: &str, chain_id: &str) -> String {
        format!("template init {moniker} --chain-id {chain_id} --home {}", home.root().display())
    }
}
