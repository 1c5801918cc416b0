//! Adapters for the pipeline's ports.

pub mod subprocess;

#[cfg(any(test, feature = "test-utils"))]
pub mod template;

pub use subprocess::{parse_node_id, SubprocessInitializer};

#[cfg(any(test, feature = "test-utils"))]
pub use template::TemplateInitializer;
