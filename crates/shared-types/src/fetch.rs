//! # HTTP Fetch Port
//!
//! Every remote read in the core (manifests, peer registries, genesis,
//! public-IP probes) goes through [`HttpFetcher`]. The core is synchronous,
//! so the port is too.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by an [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure.
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Blocking GET of a whole resource body.
pub trait HttpFetcher {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

impl<T: HttpFetcher + ?Sized> HttpFetcher for &T {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        (**self).get(url, timeout)
    }
}

// ============================================================================
// ReqwestFetcher - Production adapter (requires "http" feature)
// ============================================================================

#[cfg(feature = "http")]
mod reqwest_adapter {
    use super::*;
    use reqwest::blocking::Client;

    /// Blocking `reqwest` client behind the [`HttpFetcher`] port.
    #[derive(Debug, Clone)]
    pub struct ReqwestFetcher {
        client: Client,
    }

    impl ReqwestFetcher {
        pub fn new() -> Result<Self, FetchError> {
            let client = Client::builder()
                .user_agent(concat!("mono-ops/", env!("CARGO_PKG_VERSION")))
                .connect_timeout(Duration::from_secs(10))
                .build()
                .map_err(|e| FetchError::Client(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl HttpFetcher for ReqwestFetcher {
        fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
            let transport = |e: reqwest::Error| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            };

            let response = self.client.get(url).timeout(timeout).send().map_err(transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().map_err(transport)?;
            tracing::debug!(url, bytes = body.len(), "fetched");
            Ok(body.to_vec())
        }
    }
}

#[cfg(feature = "http")]
pub use reqwest_adapter::ReqwestFetcher;

// ============================================================================
// MockFetcher - Scripted responses (requires "test-utils" feature)
// ============================================================================

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Fetcher that answers from a fixed URL table.
    ///
    /// Unrouted URLs fail with a transport error, like an unreachable host.
    #[derive(Debug, Default)]
    pub struct MockFetcher {
        routes: HashMap<String, Result<Vec<u8>, FetchError>>,
        requests: Mutex<Vec<(String, Duration)>>,
    }

    impl MockFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `url` with a 200 and `body`.
        #[must_use]
        pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
            self.routes.insert(url.into(), Ok(body.into()));
            self
        }

        /// Answer `url` with a non-2xx `status`.
        #[must_use]
        pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
            let url = url.into();
            self.routes
                .insert(url.clone(), Err(FetchError::Status { url, status }));
            self
        }

        /// URLs requested so far, in order.
        pub fn requests(&self) -> Vec<String> {
            self.timed_requests().into_iter().map(|(url, _)| url).collect()
        }

        /// URLs requested so far with the timeout each was given.
        pub fn timed_requests(&self) -> Vec<(String, Duration)> {
            self.requests
                .lock()
                .map(|r| r.clone())
                .unwrap_or_default()
        }
    }

    impl HttpFetcher for MockFetcher {
        fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push((url.to_string(), timeout));
            }
            match self.routes.get(url) {
                Some(response) => response.clone(),
                None => Err(FetchError::Transport {
                    url: url.to_string(),
                    reason: "no route to host".to_string(),
                }),
            }
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockFetcher;
