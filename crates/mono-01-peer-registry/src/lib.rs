//! # Peer Registry
//!
//! Parses the per-network peer registry (`peers.json`) into validated
//! [`Peer`] lists.
//!
//! ## Rules
//!
//! - A node-id is exactly 40 hex characters; it is lower-cased on ingest.
//! - A host is a DNS name or an IP literal (IPv6 bracketed).
//! - A missing port defaults to 26656.
//! - Peer lists accept the string form and the object form; string first.
//! - `merge` keeps the first occurrence of each node-id.
//!
//! ## Example
//!
//! ```rust
//! use mono_01_peer_registry::{merge, Peer};
//!
//! let a = Peer::parse("1640233292d71449a29a34837cfce4d5ce34bb28@95.217.191.120:26766").unwrap();
//! let b = Peer::parse("1640233292D71449A29A34837CFCE4D5CE34BB28@seed.example.org").unwrap();
//!
//! assert_eq!(b.port(), 26656);
//! assert_eq!(merge(&[a.clone()], &[b]), vec![a]);
//! ```

pub mod domain;
pub mod service;

pub use domain::{
    join_peers, merge, parse_peer_lists, Peer, PeerError, PeerLists, PeersError, PeersRegistry,
    NODE_ID_HEX_LEN,
};
pub use service::fetch_registry;
