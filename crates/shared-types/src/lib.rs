//! # Shared Types Crate
//!
//! Types shared by every join-pipeline subsystem.
//!
//! ## Contents
//!
//! - **Node home**: the on-disk layout the node binary creates (`NodeHome`).
//! - **Error kinds**: the closed set of failure classes surfaced to operators.
//! - **Entities**: severities, sync modes, port schemes, RPC endpoint records.
//! - **Fetch port**: the `HttpFetcher` trait every remote read goes through.
//! - **Filesystem helpers**: permission-aware atomic writes.
//!
//! ## Feature Flags
//!
//! - `http` - `ReqwestFetcher`, the blocking HTTP adapter
//! - `test-utils` - `MockFetcher`, a scripted fetcher for tests

pub mod constants;
pub mod entities;
pub mod errors;
pub mod fetch;
pub mod fs;
pub mod home;

pub use constants::*;
pub use entities::*;
pub use errors::ErrorKind;
pub use fetch::{FetchError, HttpFetcher};
pub use home::NodeHome;

#[cfg(feature = "http")]
pub use fetch::ReqwestFetcher;

#[cfg(any(test, feature = "test-utils"))]
pub use fetch::MockFetcher;
