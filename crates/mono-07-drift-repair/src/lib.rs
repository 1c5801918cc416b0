//! # Drift and Repair
//!
//! Out-of-band integrity loop: compares a node home's config files with the
//! canonical values for its network and writes them back field by field.

pub mod domain;
pub mod service;

pub use domain::{peer_set, DriftError, DriftReport, DriftResult, ExpectedConfig, RepairResult};
pub use service::{detect_drift, infer_sync_mode, repair};
