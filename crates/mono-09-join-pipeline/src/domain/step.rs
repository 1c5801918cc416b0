//! Step records and the join report.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

pub const STEP_RESOLVE_NETWORK: &str = "Resolve network";
pub const STEP_DOWNLOAD_GENESIS: &str = "Download genesis";
pub const STEP_VALIDATE_GENESIS: &str = "Validate genesis";
pub const STEP_PREFLIGHT: &str = "Preflight checks";
pub const STEP_INIT_NODE: &str = "Initialize node";
pub const STEP_FETCH_PEERS: &str = "Fetch peer registry";
pub const STEP_SELECT_PEERS: &str = "Select sync peers";
pub const STEP_VERIFY_SHA256: &str = "Verify SHA256";
pub const STEP_WRITE_GENESIS: &str = "Write genesis";
pub const STEP_CLEAR_ADDRBOOK: &str = "Clear address book";
pub const STEP_APPLY_CONFIG: &str = "Apply config";
pub const STEP_CLIENT_CHAIN_ID: &str = "Set client chain-id";
pub const STEP_EVM_CHAIN_ID: &str = "Set EVM chain-id";
pub const STEP_EXTERNAL_ADDRESS: &str = "Detect external address";

/// Every step, in execution order.
pub const STEP_NAMES: [&str; 14] = [
    STEP_RESOLVE_NETWORK,
    STEP_DOWNLOAD_GENESIS,
    STEP_VALIDATE_GENESIS,
    STEP_PREFLIGHT,
    STEP_INIT_NODE,
    STEP_FETCH_PEERS,
    STEP_SELECT_PEERS,
    STEP_VERIFY_SHA256,
    STEP_WRITE_GENESIS,
    STEP_CLEAR_ADDRBOOK,
    STEP_APPLY_CONFIG,
    STEP_CLIENT_CHAIN_ID,
    STEP_EVM_CHAIN_ID,
    STEP_EXTERNAL_ADDRESS,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Success,
    Failed,
    Skipped,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinStep {
    pub name: &'static str,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinResult {
    pub steps: Vec<JoinStep>,
    pub network: Option<String>,
    pub chain_id: Option<String>,
    pub evm_chain_id: Option<u64>,
    pub node_id: Option<String>,
    pub genesis_path: Option<PathBuf>,
    /// Files written, or that would be written under dry-run.
    pub paths_written: Vec<PathBuf>,
    pub warnings: Vec<String>,
    pub dry_run: bool,
    pub success: bool,
}

impl JoinResult {
    pub fn step(&self, name: &str) -> Option<&JoinStep> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn status(&self, name: &str) -> Option<StepStatus> {
        self.step(name).map(|s| s.status)
    }

    pub fn failed_step(&self) -> Option<&JoinStep> {
        self.steps.iter().find(|s| s.status == StepStatus::Failed)
    }

    pub(crate) fn record(&mut self, name: &'static str, status: StepStatus, message: impl Into<String>) {
        let message = message.into();
        self.steps.push(JoinStep {
            name,
            status,
            message: (!message.is_empty()).then_some(message),
        });
    }

    /// Append every step after the last recorded one as pending.
    pub(crate) fn pad_pending(&mut self) {
        let recorded = self.steps.len();
        for name in STEP_NAMES.iter().copied().skip(recorded) {
            self.steps.push(JoinStep {
                name,
                status: StepStatus::Pending,
                message: None,
            });
        }
    }
}
