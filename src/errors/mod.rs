use thiserror::Error;

/// Retry-after used when a 429 response carries no usable header
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Failures surfaced by the catalog client.
///
/// The type is `Clone` because a single deduplicated fetch hands the very same
/// outcome to every caller that joined it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("network error: {message}")]
    Network {
        message: String,
        status: Option<u16>,
        details: Option<String>,
    },

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimit { retry_after_secs: u64 },

    #[error("failed to decode catalog response: {message}")]
    Decode { message: String },

    #[error("invalid {field} format, expected a UUID: {value}")]
    InvalidId { field: String, value: String },

    #[error("request queue is closed")]
    QueueClosed,
}

impl CatalogError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status: None,
            details: None,
        }
    }

    pub fn http_status(status: u16, reason: &str) -> Self {
        Self::Network {
            message: format!("HTTP {}: {}", status, reason),
            status: Some(status),
            details: None,
        }
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }

    /// Build a rate-limit error from a raw `Retry-After` header value
    pub fn rate_limited(retry_after: Option<&str>) -> Self {
        let retry_after_secs = retry_after
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        Self::RateLimit { retry_after_secs }
    }

    pub fn with_details(self, extra: impl Into<String>) -> Self {
        match self {
            Self::Network {
                message, status, ..
            } => Self::Network {
                message,
                status,
                details: Some(extra.into()),
            },
            other => other,
        }
    }

    /// Upstream HTTP status, when one is known
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            Self::RateLimit { .. } => Some(429),
            _ => None,
        }
    }

    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Whether the transport may move on to another proxy or another pass
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { status, .. } => !matches!(status, Some(400..=499)),
            _ => false,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NETWORK_ERROR",
            Self::RateLimit { .. } => "RATE_LIMITED",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::InvalidId { .. } => "INVALID_ID",
            Self::QueueClosed => "QUEUE_CLOSED",
        }
    }
}

/// Context line for failed catalog lookups in application code
pub fn lookup_context(what: &str, id: &str) -> String {
    format!("Failed to fetch {} for: {}", what, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_after_parsing() {
        assert_eq!(
            CatalogError::rate_limited(Some("12")).retry_after(),
            Some(12)
        );
        assert_eq!(
            CatalogError::rate_limited(None).retry_after(),
            Some(DEFAULT_RETRY_AFTER_SECS)
        );
        assert_eq!(
            CatalogError::rate_limited(Some("soon")).retry_after(),
            Some(DEFAULT_RETRY_AFTER_SECS)
        );
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        assert!(!CatalogError::http_status(404, "Not Found").is_retryable());
        assert!(!CatalogError::rate_limited(None).is_retryable());
        assert!(CatalogError::http_status(503, "Service Unavailable").is_retryable());
        assert!(CatalogError::network("connection reset").is_retryable());
    }

    #[test]
    fn test_details_only_attach_to_network_errors() {
        let err = CatalogError::network("timeout").with_details("proxy #1");
        assert_eq!(
            err,
            CatalogError::Network {
                message: "timeout".to_string(),
                status: None,
                details: Some("proxy #1".to_string()),
            }
        );

        let err = CatalogError::QueueClosed.with_details("ignored");
        assert_eq!(err, CatalogError::QueueClosed);
    }
}
