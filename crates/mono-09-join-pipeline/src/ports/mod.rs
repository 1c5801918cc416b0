//! Ports for the join pipeline's external collaborators.

use shared_types::NodeHome;

use crate::domain::InitError;

/// Result of a node `init` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOutput {
    /// Node-id reported by the binary, if it printed one.
    pub node_id: Option<String>,
    /// Combined stdout and stderr.
    pub output: String,
}

/// Creates a node home (config templates, keys, data dir).
pub trait NodeInitializer {
    fn init(&self, home: &NodeHome, moniker: &str, chain_id: &str) -> Result<InitOutput, InitError>;

    /// Human-readable form of what `init` would do, for dry-run reports.
    fn describe(&self, home: &NodeHome, moniker: &str, chain_id: &str) -> String;
}

impl<T: NodeInitializer + ?Sized> NodeInitializer for &T {
    fn init(&self, home: &NodeHome, moniker: &str, chain_id: &str) -> Result<InitOutput, InitError> {
        (**self).init(home, moniker, chain_id)
    }

    fn describe(&self, home: &NodeHome, moniker: &str, chain_id: &str) -> String {
        (**self).describe(home, moniker, chain_id)
    }
}
