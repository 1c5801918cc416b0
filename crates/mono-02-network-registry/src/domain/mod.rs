//! Network registry domain: identities, manifests, the embedded table.

pub mod embedded;
pub mod errors;
pub mod manifest;
pub mod network;
pub mod registry;

pub use embedded::{embedded_networks, NETWORKS_REPO_BASE};
pub use errors::RegistryError;
pub use manifest::NetworkConfig;
pub use network::{Network, NetworkName};
pub use registry::{guard_localnet, NetworkRegistry};
