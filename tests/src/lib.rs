//! # Mono-Ops Test Suite
//!
//! Cross-crate scenarios. Per-crate unit tests live next to the code.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs       # Manifests, genesis bytes, pipeline builders
//!     ├── join_flows.rs     # Canonical manifest → join → drift-clean home
//!     ├── leak_flows.rs     # Localnet EVM-id guard across remote and cache
//!     └── repair_flows.rs   # Tampered home → drift → repair → clean
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mono-tests
//! cargo test -p mono-tests integration::repair_flows
//! ```

#[cfg(test)]
mod integration;
