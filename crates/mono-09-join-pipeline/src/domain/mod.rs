//! Join domain: options, step records, errors, peer selection.

pub mod errors;
pub mod moniker;
pub mod options;
pub mod peers;
pub mod step;

pub use errors::{InitError, JoinError, JoinFailure};
pub use moniker::{clean_moniker, derive_moniker, system_hostname};
pub use options::JoinOptions;
pub use peers::{select_sync_peers, PeerCandidates, SyncSelection};
pub use step::{JoinResult, JoinStep, StepStatus, STEP_NAMES};
