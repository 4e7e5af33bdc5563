//! HTTP client abstraction for testability

use super::event::FetchError;
use crate::config::DEFAULT_TIMEOUT_SECS;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{trace, warn};

/// Trait for asynchronous HTTP GET operations.
///
/// This abstraction allows dependency injection of mock transports in
/// tests; the fetch coordinator is generic over it.
pub trait HttpClient: Send + Sync + 'static {
    /// Performs an async HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        (**self).get(url)
    }
}

/// Default User-Agent for tile requests. Tile services commonly reject
/// requests without one.
const DEFAULT_USER_AGENT: &str = concat!("wristmap/", env!("CARGO_PKG_VERSION"));

/// Real HTTP client backed by reqwest.
///
/// The per-request timeout is enforced here, so a hung server surfaces
/// as an ordinary [`FetchError::Network`] after the deadline.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the default request timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with a custom per-request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    "HTTP request failed"
                );
                return Err(FetchError::Network(format!("request failed: {}", e)));
            }
        };

        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(FetchError::Network(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => Err(FetchError::Network(format!(
                "failed to read response: {}",
                e
            ))),
        }
    }
}
