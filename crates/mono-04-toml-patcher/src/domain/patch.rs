//! `config.toml [p2p]` delta computed from the selected peer lists.

use mono_01_peer_registry::{join_peers, Peer};
use shared_types::SyncMode;

use crate::domain::value::{TomlEdit, TomlValue};

pub const P2P_SECTION: &str = "p2p";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigPatch {
    pub seeds: String,
    pub persistent_peers: String,
    /// `None` leaves `pex` as it is.
    pub pex: Option<bool>,
}

impl ConfigPatch {
    /// Build the patch for `mode` from already-selected lists.
    ///
    /// Bootstrap clears seeds and turns PEX off; the caller passes the
    /// bootstrap set as `persistent`.
    pub fn generate(seeds: &[Peer], persistent: &[Peer], mode: SyncMode) -> Self {
        match mode {
            SyncMode::Bootstrap => Self {
                seeds: String::new(),
                persistent_peers: join_peers(persistent),
                pex: Some(false),
            },
            SyncMode::Default | SyncMode::Statesync => Self {
                seeds: join_peers(seeds),
                persistent_peers: join_peers(persistent),
                pex: Some(true),
            },
        }
    }

    pub fn edits(&self) -> Vec<TomlEdit> {
        let mut edits = vec![
            TomlEdit::new(P2P_SECTION, "seeds", TomlValue::str(&self.seeds)),
            TomlEdit::new(
                P2P_SECTION,
                "persistent_peers",
                TomlValue::str(&self.persistent_peers),
            ),
        ];
        if let Some(pex) = self.pex {
            edits.push(TomlEdit::new(P2P_SECTION, "pex", TomlValue::Bool(pex)));
        }
        edits
    }
}
