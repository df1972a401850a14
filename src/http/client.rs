use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::RETRY_AFTER;
use std::time::Duration;

use crate::errors::CatalogError;

/// Status, rate-limit hint and body of one HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub retry_after: Option<String>,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: String::new(),
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single GET against an absolute URL.
///
/// Non-2xx statuses are returned as responses, only connection-level problems
/// are errors.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, CatalogError>;
}

/// `HttpFetch` backed by a pooled reqwest client
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Self::build_client(user_agent, timeout)?;
        Ok(Self { client })
    }

    fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, CatalogError> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                CatalogError::network("Failed to build HTTP client").with_details(e.to_string())
            })
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response, CatalogError> {
        self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "Request timed out"
            } else {
                "Failed to send GET request"
            };
            CatalogError::network(message).with_details(e.to_string())
        })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<RawResponse, CatalogError> {
        let response = self.send_get_request(url).await?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| {
            CatalogError::network("Failed to read response body").with_details(e.to_string())
        })?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            retry_after,
            body,
        })
    }
}
