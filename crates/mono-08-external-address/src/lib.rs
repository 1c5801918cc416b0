//! # External-address Detector
//!
//! Asks a short, ordered list of public-IP echo services for this host's
//! address and returns the first answer that is a routable public address.
//! Detection failure is never an error: the caller simply leaves
//! `external_address` alone.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use shared_types::{HttpFetcher, ADDRESS_PROBE_TIMEOUT};
use tracing::{debug, info, warn};

/// Probe endpoints, tried in order.
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "https://api.ipify.org",
    "https://ifconfig.me/ip",
    "https://icanhazip.com",
];

pub struct AddressDetector<F: HttpFetcher> {
    fetcher: F,
    endpoints: Vec<String>,
    timeout: Duration,
}

impl<F: HttpFetcher> AddressDetector<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            timeout: ADDRESS_PROBE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// First public address reported by any endpoint.
    pub fn detect(&self) -> Option<IpAddr> {
        for endpoint in &self.endpoints {
            let body = match self.fetcher.get(endpoint, self.timeout) {
                Ok(body) => body,
                Err(e) => {
                    debug!(endpoint = %endpoint, error = %e, "address probe failed");
                    continue;
                }
            };

            let text = String::from_utf8_lossy(&body);
            match text.trim().parse::<IpAddr>() {
                Ok(ip) if is_public(&ip) => {
                    info!(endpoint = %endpoint, %ip, "public address detected");
                    return Some(ip);
                }
                Ok(ip) => debug!(endpoint = %endpoint, %ip, "ignoring non-public address"),
                Err(_) => debug!(endpoint = %endpoint, "probe returned no address"),
            }
        }
        warn!("no public address detected");
        None
    }
}

/// Whether `ip` is a globally routable unicast address.
pub fn is_public(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => is_public_v6(v6),
    }
}

fn is_public_v4(ip: &Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();
    let cgnat = a == 100 && (64..=127).contains(&b);
    let documentation = matches!((a, b, c), (192, 0, 2) | (198, 51, 100) | (203, 0, 113));
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_broadcast()
        || ip.is_multicast()
        || ip.is_unspecified()
        || cgnat
        || documentation)
}

fn is_public_v6(ip: &Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = (first & 0xfe00) == 0xfc00;
    let link_local = (first & 0xffc0) == 0xfe80;
    !(ip.is_loopback() || ip.is_unspecified() || ip.is_multicast() || unique_local || link_local)
}

/// `tcp://<ip>:<port>`, IPv6 bracketed.
pub fn external_address_value(ip: &IpAddr, port: u16) -> String {
    match ip {
        IpAddr::V4(v4) => format!("tcp://{v4}:{port}"),
        IpAddr::V6(v6) => format!("tcp://[{v6}]:{port}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::MockFetcher;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_private_ranges_are_rejected() {
        for addr in [
            "10.1.2.3",
            "172.16.0.1",
            "192.168.1.1",
            "127.0.0.1",
            "169.254.1.1",
            "100.64.0.1",
            "192.0.2.1",
            "203.0.113.7",
            "255.255.255.255",
            "224.0.0.1",
            "0.0.0.0",
            "::1",
            "::",
            "fd00::1",
            "fe80::1",
            "ff02::1",
        ] {
            assert!(!is_public(&ip(addr)), "{addr}");
        }
        assert!(is_public(&ip("93.184.216.34")));
        assert!(is_public(&ip("100.128.0.1")));
        assert!(is_public(&ip("2606:4700::1111")));
    }

    #[test]
    fn test_first_public_answer_wins() {
        let fetcher = MockFetcher::new()
            .with_body(DEFAULT_ENDPOINTS[0], b"192.168.0.10\n".to_vec())
            .with_status(DEFAULT_ENDPOINTS[1], 502)
            .with_body(DEFAULT_ENDPOINTS[2], b" 93.184.216.34\n".to_vec());
        let detector = AddressDetector::new(&fetcher);

        assert_eq!(detector.detect(), Some(ip("93.184.216.34")));
        assert_eq!(fetcher.requests().len(), 3);
    }

    #[test]
    fn test_nothing_reachable() {
        let detector = AddressDetector::new(MockFetcher::new());
        assert_eq!(detector.detect(), None);
    }

    #[test]
    fn test_garbage_body_is_skipped() {
        let fetcher = MockFetcher::new()
            .with_body("https://probe.example.org", b"<html>".to_vec());
        let detector =
            AddressDetector::new(fetcher).with_endpoints(vec!["https://probe.example.org".into()]);
        assert_eq!(detector.detect(), None);
    }

    #[test]
    fn test_external_address_value() {
        assert_eq!(external_address_value(&ip("93.184.216.34"), 26656), "tcp://93.184.216.34:26656");
        assert_eq!(
            external_address_value(&ip("2606:4700::1111"), 26656),
            "tcp://[2606:4700::1111]:26656"
        );
    }
}
