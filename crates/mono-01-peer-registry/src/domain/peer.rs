//! Peer value object.
//!
//! Canonical textual form: `<node-id>@<host>:<port>`.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use shared_types::DEFAULT_P2P_PORT;

use crate::domain::errors::PeerError;

/// Length of a node-id in hex characters.
pub const NODE_ID_HEX_LEN: usize = 40;

/// A validated P2P peer address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Peer {
    node_id: String,
    host: String,
    port: u16,
}

impl Peer {
    /// Build a peer from parts. The node-id is lower-cased.
    pub fn new(node_id: &str, host: &str, port: u16) -> Result<Self, PeerError> {
        let node_id = validate_node_id(node_id)?;
        validate_host(host)?;
        if port == 0 {
            return Err(PeerError::InvalidPort(port.to_string()));
        }
        Ok(Self {
            node_id,
            host: host.to_string(),
            port,
        })
    }

    /// Parse `<node-id>@<host>[:<port>]`. The port defaults to 26656.
    ///
    /// IPv6 hosts must be bracketed: `<id>@[::1]:26656`.
    pub fn parse(input: &str) -> Result<Self, PeerError> {
        let s = input.trim();
        let (id, addr) = s
            .split_once('@')
            .ok_or_else(|| PeerError::MissingSeparator(s.to_string()))?;
        let (host, port) = split_host_port(addr)?;
        Self::new(id, host, port)
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.node_id, self.host, self.port)
    }
}

impl FromStr for Peer {
    type Err = PeerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split `host[:port]`, honouring bracketed IPv6.
pub(crate) fn split_host_port(addr: &str) -> Result<(&str, u16), PeerError> {
    if addr.starts_with('[') {
        let close = addr
            .find(']')
            .ok_or_else(|| PeerError::InvalidHost(addr.to_string()))?;
        let (host, after) = addr.split_at(close + 1);
        if after.is_empty() {
            return Ok((host, DEFAULT_P2P_PORT));
        }
        let port = after
            .strip_prefix(':')
            .ok_or_else(|| PeerError::InvalidHost(addr.to_string()))?;
        return Ok((host, parse_port(port)?));
    }

    match addr.rsplit_once(':') {
        Some((host, port)) => Ok((host, parse_port(port)?)),
        None => Ok((addr, DEFAULT_P2P_PORT)),
    }
}

pub(crate) fn parse_port(raw: &str) -> Result<u16, PeerError> {
    match raw.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(PeerError::InvalidPort(raw.to_string())),
    }
}

fn validate_node_id(raw: &str) -> Result<String, PeerError> {
    let id = raw.trim();
    if id.len() != NODE_ID_HEX_LEN || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PeerError::InvalidNodeId(raw.to_string()));
    }
    Ok(id.to_ascii_lowercase())
}

fn validate_host(host: &str) -> Result<(), PeerError> {
    let invalid = || PeerError::InvalidHost(host.to_string());

    if host.is_empty() {
        return Err(invalid());
    }

    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return inner.parse::<Ipv6Addr>().map(|_| ()).map_err(|_| invalid());
    }

    if host.parse::<Ipv4Addr>().is_ok() {
        return Ok(());
    }

    // DNS name: dot-separated labels of [A-Za-z0-9-], no leading/trailing hyphen.
    if host.len() > 253 {
        return Err(invalid());
    }
    let labels_ok = host.trim_end_matches('.').split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    });
    if labels_ok {
        Ok(())
    } else {
        Err(invalid())
    }
}
