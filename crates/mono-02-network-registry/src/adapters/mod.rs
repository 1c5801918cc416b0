//! Filesystem adapters.

pub mod cache;

pub use cache::{user_config_dir, CacheMeta, CachedManifest, NetworkCache};
