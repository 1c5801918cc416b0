//! # TOML Patcher
//!
//! Edits `config.toml`, `app.toml` and `client.toml` one assignment line at
//! a time, so comments, blank lines, key order and indentation of every
//! other line survive byte-for-byte.
//!
//! ## Call Sites
//!
//! | Function                | File        | Section | Key(s)                          |
//! |-------------------------|-------------|---------|---------------------------------|
//! | `apply_config_patch`    | config.toml | p2p     | seeds, persistent_peers, pex    |
//! | `set_external_address`  | config.toml | p2p     | external_address                |
//! | `set_client_chain_id`   | client.toml | (top)   | chain-id                        |
//! | `set_evm_chain_id`      | app.toml    | evm     | evm-chain-id                    |
//!
//! Reads (`get_value`, `get_string`, `validate_toml`) use the `toml` parser.

pub mod domain;
pub mod service;

pub use domain::{
    apply_edits, is_assignment, section_header, AppliedEdit, ConfigPatch, PatchError,
    PatchOutcome, TomlEdit, TomlValue, P2P_SECTION,
};
pub use service::{
    apply_config_patch, get_string, get_value, patch_file, set_client_chain_id,
    set_evm_chain_id, set_external_address, validate_toml, value_to_string, PatchMode,
};
