use mono_04_toml_patcher::PatchError;
use shared_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoleError {
    #[error("unknown node role '{0}' (expected full_node, archive_node or seed_node)")]
    UnknownRole(String),

    #[error("unknown pruning mode '{0}'")]
    UnknownPruning(String),

    #[error(transparent)]
    Patch(#[from] PatchError),
}

impl RoleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownRole(_) | Self::UnknownPruning(_) => ErrorKind::Schema,
            Self::Patch(e) => e.kind(),
        }
    }
}
