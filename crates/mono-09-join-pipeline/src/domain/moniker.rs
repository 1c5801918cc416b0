//! Moniker derivation.

use std::fs;

const MAX_MONIKER_LEN: usize = 20;
const FALLBACK_MONIKER: &str = "node";

/// Lowercase, dots to hyphens, only `[a-z0-9-]`, at most 20 characters.
pub fn clean_moniker(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '.' { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .take(MAX_MONIKER_LEN)
        .collect();

    if cleaned.is_empty() {
        FALLBACK_MONIKER.to_string()
    } else {
        cleaned
    }
}

/// This machine's hostname, if it can be found.
pub fn system_hostname() -> Option<String> {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .or_else(|| fs::read_to_string("/etc/hostname").ok())
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
}

/// Moniker for a fresh node: the explicit one, else the cleaned hostname.
pub fn derive_moniker(explicit: Option<&str>) -> String {
    match explicit.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => m.to_string(),
        None => clean_moniker(&system_hostname().unwrap_or_default()),
    }
}
