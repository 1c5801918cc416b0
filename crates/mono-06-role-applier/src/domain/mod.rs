pub mod errors;
pub mod role;
pub mod validation;

pub use errors::RoleError;
pub use role::{get_role_config, NodeRole, PruningMode, RoleConfig};
pub use validation::{evaluate, infer_role, ObservedSettings, ValidationIssue, ValidationResult};
