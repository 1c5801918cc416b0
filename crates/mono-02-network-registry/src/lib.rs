//! # Network Registry
//!
//! Maps network names to chain identities.
//!
//! ## Sources
//!
//! | Source   | When                                                  |
//! |----------|-------------------------------------------------------|
//! | Remote   | Canonical manifest fetched and verified at a git ref  |
//! | Cache    | Remote unavailable, cached manifest verifies          |
//! | Embedded | Localnet, or nothing else is available                |
//!
//! ## Invariants
//!
//! - EVM chain-ids are unique across the table.
//! - Only Localnet may carry EVM chain-id 262145. Anything else carrying it
//!   is a fatal error, never a fallback.

pub mod adapters;
pub mod domain;
pub mod service;

pub use adapters::{user_config_dir, CacheMeta, CachedManifest, NetworkCache};
pub use domain::{
    embedded_networks, guard_localnet, Network, NetworkConfig, NetworkName, NetworkRegistry,
    RegistryError, NETWORKS_REPO_BASE,
};
pub use service::{
    manifest_url, CanonicalResolver, Resolution, ResolutionSource, DEFAULT_CANONICAL_BASE,
    DEFAULT_GIT_REF,
};
