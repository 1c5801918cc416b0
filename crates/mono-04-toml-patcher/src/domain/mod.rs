//! Pure editing: values, the line editor, and the p2p patch.

pub mod editor;
pub mod errors;
pub mod patch;
pub mod value;

pub use editor::{apply_edits, is_assignment, section_header, AppliedEdit, PatchOutcome};
pub use errors::PatchError;
pub use patch::{ConfigPatch, P2P_SECTION};
pub use value::{TomlEdit, TomlValue};
