//! Patcher errors.

use std::io;

use shared_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    /// The key has no assignment in the target section.
    #[error("key '{key}' not found in section [{section}] of {file}")]
    KeyMissing {
        file: String,
        section: String,
        key: String,
    },

    /// The file is not valid TOML (read path).
    #[error("cannot parse {path}: {reason}")]
    Parse { path: String, reason: String },

    /// The edited content no longer parses although the original did.
    #[error("refusing to write {path}: edit would produce invalid TOML ({reason})")]
    Corrupted { path: String, reason: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyMissing { .. } => ErrorKind::TomlKeyMissing,
            Self::Parse { .. } | Self::Corrupted { .. } => ErrorKind::Schema,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
