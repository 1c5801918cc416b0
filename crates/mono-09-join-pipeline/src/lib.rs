//! # Join Pipeline
//!
//! Takes a node home from empty (or previously initialized) to joined to
//! the selected network.
//!
//! ## Steps
//!
//! | #  | Step                    | Fatal on                                   |
//! |----|-------------------------|--------------------------------------------|
//! | 1  | Resolve network         | unknown network, Localnet leak             |
//! | 2  | Download genesis        | fetch failure                              |
//! | 3  | Validate genesis        | chain-id mismatch                          |
//! | 4  | Preflight checks        | dirty data, chain-id on disk               |
//! | 5  | Initialize node         | binary missing, `init` failure             |
//! | 6  | Fetch peer registry     | malformed registry                         |
//! | 7  | Select sync peers       | bootstrap with no peers                    |
//! | 8  | Verify SHA256           | digest mismatch                            |
//! | 9  | Write genesis           | I/O                                        |
//! | 10 | Clear address book      | I/O                                        |
//! | 11 | Apply config            | missing template key                       |
//! | 12 | Set client chain-id     | missing template key                       |
//! | 13 | Set EVM chain-id        | missing template key                       |
//! | 14 | Detect external address | never                                      |
//!
//! Nothing in the home is touched before step 4 passes.
//!
//! ## Usage
//!
//! ```ignore
//! let pipeline = JoinPipeline::new(fetcher, SubprocessInitializer::new(None), OpsConfig::from_env());
//! match pipeline.run(&JoinOptions::new(NetworkName::Sprintnet, "/var/lib/mono")) {
//!     Ok(result) => println!("{} steps", result.steps.len()),
//!     Err(failure) => eprintln!("{failure}\n{}", failure.remediation()),
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{parse_node_id, SubprocessInitializer};
pub use config::{ConfigError, OpsConfig};
pub use domain::{
    clean_moniker, derive_moniker, select_sync_peers, InitError, JoinError, JoinFailure,
    JoinOptions, JoinResult, JoinStep, PeerCandidates, StepStatus, SyncSelection, STEP_NAMES,
};
pub use ports::{InitOutput, NodeInitializer};
pub use service::JoinPipeline;

#[cfg(any(test, feature = "test-utils"))]
pub use adapters::TemplateInitializer;
