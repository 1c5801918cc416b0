//! Mono-Ops operator CLI.
//!
//! Thin wiring over the subsystem crates: argument parsing, the production
//! adapters (`ReqwestFetcher`, `SubprocessInitializer`) and result rendering.

pub mod cli;
pub mod commands;
pub mod render;
