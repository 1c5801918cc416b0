//! Node binary subprocess adapter.

use std::path::{Path, PathBuf};
use std::process::Command;

use shared_types::{NodeHome, NODE_BINARY_NAME};
use tracing::{debug, info};

use crate::domain::InitError;
use crate::ports::{InitOutput, NodeInitializer};

/// Runs `<binary> init <moniker> --chain-id <id> --home <home>`.
#[derive(Debug, Clone, Default)]
pub struct SubprocessInitializer {
    explicit: Option<PathBuf>,
}

impl SubprocessInitializer {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// Candidate paths in probe order: explicit, `<home>/bin`,
    /// `/usr/local/bin`, then each `PATH` entry.
    pub fn candidates(&self, home: &NodeHome) -> Vec<PathBuf> {
        let mut out = Vec::new();
        if let Some(explicit) = &self.explicit {
            out.push(explicit.clone());
        }
        out.push(home.bin_dir().join(NODE_BINARY_NAME));
        out.push(Path::new("/usr/local/bin").join(NODE_BINARY_NAME));
        if let Some(path) = std::env::var_os("PATH") {
            out.extend(std::env::split_paths(&path).map(|dir| dir.join(NODE_BINARY_NAME)));
        }
        out
    }

    pub fn locate(&self, home: &NodeHome) -> Result<PathBuf, InitError> {
        let candidates = self.candidates(home);
        match candidates.iter().find(|p| is_executable(p)) {
            Some(found) => {
                debug!(binary = %found.display(), "node binary located");
                Ok(found.clone())
            }
            None => Err(InitError::BinaryNotFound {
                searched: candidates.iter().map(|p| p.display().to_string()).collect(),
            }),
        }
    }
}

impl NodeInitializer for SubprocessInitializer {
    fn init(&self, home: &NodeHome, moniker: &str, chain_id: &str) -> Result<InitOutput, InitError> {
        let binary = self.locate(home)?;
        let shown = binary.display().to_string();

        let output = Command::new(&binary)
            .arg("init")
            .arg(moniker)
            .arg("--chain-id")
            .arg(chain_id)
            .arg("--home")
            .arg(home.root())
            .output()
            .map_err(|source| InitError::Spawn {
                binary: shown.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(InitError::Failed {
                binary: shown,
                status: output.status.to_string(),
                output: tail(&combined, 20),
            });
        }

        let node_id = parse_node_id(&combined);
        info!(binary = %shown, moniker, node_id = node_id.as_deref().unwrap_or("unknown"), "node initialized");
        Ok(InitOutput {
            node_id,
            output: combined,
        })
    }

    fn describe(&self, home: &NodeHome, moniker: &str, chain_id: &str) -> String {
        let binary = self
            .locate(home)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| NODE_BINARY_NAME.to_string());
        format!(
            "{binary} init {moniker} --chain-id {chain_id} --home {}",
            home.root().display()
        )
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}

/// Find `"node_id":"<40 hex>"` anywhere in `output`. Blanks around the
/// colon are tolerated.
pub fn parse_node_id(output: &str) -> Option<String> {
    const KEY: &str = "\"node_id\"";
    let mut rest = output;
    while let Some(pos) = rest.find(KEY) {
        rest = &rest[pos + KEY.len()..];
        let candidate = rest
            .trim_start()
            .strip_prefix(':')
            .map(str::trim_start)
            .and_then(|s| s.strip_prefix('"'));
        if let Some(value) = candidate {
            let id: String = value.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
            if id.len() == 40 && value[id.len()..].starts_with('"') {
                return Some(id.to_ascii_lowercase());
            }
        }
    }
    None
}
