//! Peer registry domain: peers, registry documents, list operations.

pub mod errors;
pub mod peer;
pub mod registry;

pub use errors::{PeerError, PeersError};
pub use peer::{Peer, NODE_ID_HEX_LEN};
pub use registry::{join_peers, merge, parse_peer_lists, PeerLists, PeersRegistry};
