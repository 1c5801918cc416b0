pub mod errors;
pub mod expected;
pub mod report;

pub use errors::DriftError;
pub use expected::{peer_set, ExpectedConfig};
pub use report::{DriftReport, DriftResult, RepairResult};
