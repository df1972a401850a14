use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

use crate::api::query::{QueryParams, build_resource_key};
use crate::cache::ResponseCache;
use crate::config::ClientSettings;
use crate::dedup::Deduplicator;
use crate::errors::CatalogError;
use crate::http::{HttpFetch, ProxyTransport, ReqwestFetcher};
use crate::rate_limiter::RequestQueue;

/// Per-request switches
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Neither read from nor write to the response cache
    pub skip_cache: bool,
}

impl RequestOptions {
    pub fn skip_cache() -> Self {
        Self { skip_cache: true }
    }
}

/// Catalog API client.
///
/// A read goes cache -> in-flight dedup -> request queue -> proxy transport,
/// and successful payloads are cached on the way back. Construct one per
/// application (inside a Tokio runtime) and share it.
pub struct CatalogClient {
    base_url: String,
    transport: Arc<ProxyTransport>,
    queue: Arc<RequestQueue>,
    dedup: Deduplicator<Value>,
    cache: Arc<ResponseCache>,
}

impl CatalogClient {
    /// Create a client talking HTTP through reqwest
    pub fn new(settings: &ClientSettings) -> Result<Self, CatalogError> {
        let fetcher = ReqwestFetcher::new(&settings.user_agent, settings.timeout)?;
        Ok(Self::with_fetcher(settings, Arc::new(fetcher)))
    }

    pub fn with_fetcher(settings: &ClientSettings, fetcher: Arc<dyn HttpFetch>) -> Self {
        let transport = ProxyTransport::new(
            fetcher,
            settings.proxies.clone(),
            settings.timeout,
            settings.max_retries,
            settings.retry_delay,
        );

        Self {
            base_url: settings.base_url.clone(),
            transport: Arc::new(transport),
            queue: Arc::new(RequestQueue::new(settings.rate_limit_delay)),
            dedup: Deduplicator::new(),
            cache: Arc::new(ResponseCache::new(
                settings.cache_ttl,
                settings.cache_high_water,
            )),
        }
    }

    /// Fetch `endpoint` and map the JSON payload onto `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<&QueryParams>,
        options: RequestOptions,
    ) -> Result<T, CatalogError> {
        let value = self.request_value(endpoint, params, options).await?;
        serde_json::from_value(value).map_err(CatalogError::decode)
    }

    /// Fetch `endpoint` as raw JSON
    pub async fn request_value(
        &self,
        endpoint: &str,
        params: Option<&QueryParams>,
        options: RequestOptions,
    ) -> Result<Value, CatalogError> {
        let key = build_resource_key(&self.base_url, endpoint, params);

        if !options.skip_cache {
            if let Some(hit) = self.cache.get(&key) {
                debug!("Cache hit: {}", key);
                return Ok(hit);
            }
        }

        // Cache-bypassing reads only join other cache-bypassing reads
        let in_flight_key = if options.skip_cache {
            format!("{}#no-cache", key)
        } else {
            key.clone()
        };

        let fetch = Self::queued_fetch(
            Arc::clone(&self.queue),
            Arc::clone(&self.transport),
            Arc::clone(&self.cache),
            key,
            options,
        );
        self.dedup.run(&in_flight_key, move || fetch).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Distinct requests currently waiting on the network
    pub fn in_flight(&self) -> usize {
        self.dedup.in_flight()
    }

    // --- Helper Methods ---

    /// Queue one transport call for `key`; runs only when first polled
    fn queued_fetch(
        queue: Arc<RequestQueue>,
        transport: Arc<ProxyTransport>,
        cache: Arc<ResponseCache>,
        key: String,
        options: RequestOptions,
    ) -> impl Future<Output = Result<Value, CatalogError>> + Send + 'static {
        async move {
            queue
                .enqueue(move || async move {
                    info!("Requesting {}", key);
                    let response = transport.fetch(&key).await?;
                    let value: Value =
                        serde_json::from_str(&response.body).map_err(CatalogError::decode)?;

                    if !options.skip_cache {
                        cache.set(&key, value.clone());
                    }
                    Ok(value)
                })
                .await
        }
    }
}
