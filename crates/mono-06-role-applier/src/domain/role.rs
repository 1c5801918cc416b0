//! Roles and the settings each one requires.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::RoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    FullNode,
    ArchiveNode,
    SeedNode,
}

impl NodeRole {
    pub const ALL: [NodeRole; 3] = [NodeRole::FullNode, NodeRole::ArchiveNode, NodeRole::SeedNode];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullNode => "full_node",
            Self::ArchiveNode => "archive_node",
            Self::SeedNode => "seed_node",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeRole {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "full_node" | "full" => Ok(Self::FullNode),
            "archive_node" | "archive" => Ok(Self::ArchiveNode),
            "seed_node" | "seed" => Ok(Self::SeedNode),
            _ => Err(RoleError::UnknownRole(s.trim().to_string())),
        }
    }
}

/// `app.toml` top-level `pruning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PruningMode {
    Default,
    Nothing,
    Everything,
    Custom,
}

impl PruningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Nothing => "nothing",
            Self::Everything => "everything",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PruningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PruningMode {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "nothing" => Ok(Self::Nothing),
            "everything" => Ok(Self::Everything),
            "custom" => Ok(Self::Custom),
            _ => Err(RoleError::UnknownPruning(s.trim().to_string())),
        }
    }
}

/// Settings a role requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleConfig {
    pub seed_mode: bool,
    pub pruning: PruningMode,
    /// Only for `custom` pruning.
    pub pruning_keep_recent: Option<u64>,
    pub pruning_interval: Option<u64>,
    /// The node must serve history from block 1.
    pub requires_earliest_height_one: bool,
}

pub fn get_role_config(role: NodeRole) -> RoleConfig {
    match role {
        NodeRole::FullNode => RoleConfig {
            seed_mode: false,
            pruning: PruningMode::Custom,
            pruning_keep_recent: Some(100),
            pruning_interval: Some(10),
            requires_earliest_height_one: false,
        },
        NodeRole::ArchiveNode => RoleConfig {
            seed_mode: false,
            pruning: PruningMode::Nothing,
            pruning_keep_recent: None,
            pruning_interval: None,
            requires_earliest_height_one: false,
        },
        NodeRole::SeedNode => RoleConfig {
            seed_mode: true,
            pruning: PruningMode::Nothing,
            pruning_keep_recent: None,
            pruning_interval: None,
            requires_earliest_height_one: true,
        },
    }
}
