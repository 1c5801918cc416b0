//! Cross-crate integration scenarios.

mod fixtures;
mod join_flows;
mod leak_flows;
mod repair_flows;
