//! # Role Applier
//!
//! | Role         | seed_mode | pruning                          | earliest height 1 |
//! |--------------|-----------|----------------------------------|-------------------|
//! | full_node    | false     | custom (keep 100, interval 10)   | no                |
//! | archive_node | false     | nothing                          | no                |
//! | seed_node    | true      | nothing                          | yes               |
//!
//! A seed that prunes cannot serve the history peers crawl it for, so
//! `seed_mode = true` with pruning other than `nothing` is reported as
//! critical whatever role was declared.

pub mod domain;
pub mod service;

pub use domain::{
    evaluate, get_role_config, infer_role, NodeRole, ObservedSettings, PruningMode, RoleConfig,
    RoleError, ValidationIssue, ValidationResult,
};
pub use service::{apply, detect_current, read_observed, validate, ApplyResult};
