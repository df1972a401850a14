use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use super::client::{HttpFetch, RawResponse};
use super::proxy::ProxyEndpoint;
use crate::errors::CatalogError;

/// Executes catalog GETs through an ordered list of proxies.
///
/// Every pass walks the whole proxy list before backing off. A 429 or any
/// other 4xx ends the call at once; everything else moves on to the next
/// proxy and, once the list is exhausted, to the next pass.
pub struct ProxyTransport {
    fetcher: Arc<dyn HttpFetch>,
    proxies: Vec<ProxyEndpoint>,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl ProxyTransport {
    pub fn new(
        fetcher: Arc<dyn HttpFetch>,
        proxies: Vec<ProxyEndpoint>,
        timeout: Duration,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            proxies,
            timeout,
            max_retries,
            retry_delay,
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<RawResponse, CatalogError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match self.try_all_proxies(url).await {
                Ok(response) => return Ok(response),
                Err(Some(err)) if !err.is_retryable() => return Err(err),
                Err(err) => last_error = err.or(last_error),
            }

            if attempt < self.max_retries {
                let delay = self.backoff_delay(attempt);
                warn!(
                    "All proxies failed for {} (pass {}), retrying in {:?}",
                    url,
                    attempt + 1,
                    delay
                );
                sleep(delay).await;
            }
        }

        Err(Self::exhausted(last_error))
    }

    /// Delay slept after the given zero-based pass
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    // --- Helper Methods ---

    /// One pass over the proxy list; `Err(None)` when there was nothing to try
    async fn try_all_proxies(&self, url: &str) -> Result<RawResponse, Option<CatalogError>> {
        let mut last_error = None;

        for proxy in &self.proxies {
            match self.try_proxy(proxy, url).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() => {
                    warn!("Proxy {} failed: {}", proxy, err);
                    last_error = Some(err);
                }
                Err(err) => return Err(Some(err)),
            }
        }

        Err(last_error)
    }

    async fn try_proxy(&self, proxy: &ProxyEndpoint, url: &str) -> Result<RawResponse, CatalogError> {
        let request_url = proxy.wrap(url);
        debug!("GET {} via {}", url, proxy);

        let response = match timeout(self.timeout, self.fetcher.get(&request_url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(CatalogError::network(format!(
                    "Request timed out after {:?}",
                    self.timeout
                )));
            }
        };

        Self::classify(response)
    }

    fn classify(response: RawResponse) -> Result<RawResponse, CatalogError> {
        if response.status == 429 {
            return Err(CatalogError::rate_limited(response.retry_after.as_deref()));
        }

        if response.is_success() {
            return Ok(response);
        }

        Err(CatalogError::http_status(response.status, &response.reason))
    }

    fn exhausted(last_error: Option<CatalogError>) -> CatalogError {
        match last_error {
            Some(err @ CatalogError::Network { .. }) => err,
            Some(other) => CatalogError::network("All proxies failed").with_details(other.to_string()),
            None => CatalogError::network("All proxies failed"),
        }
    }
}
