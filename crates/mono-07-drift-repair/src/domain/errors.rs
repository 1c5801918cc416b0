use mono_04_toml_patcher::PatchError;
use shared_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriftError {
    #[error("cannot read node config: {0}")]
    Read(#[from] PatchError),
}

impl DriftError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Read(e) => e.kind(),
        }
    }
}
