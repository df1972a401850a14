use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::api::endpoints::CatalogApi;
use crate::api::types::{RatingMode, TitleType};
use crate::config::ServerSettings;
use crate::errors::CatalogError;

pub mod admin;
pub mod manga;
pub mod titles;

pub struct AppState {
    pub api: CatalogApi,
    pub server: ServerSettings,
}

#[derive(Deserialize)]
pub struct TitleParams {
    #[serde(rename = "type")]
    pub title_type: Option<TitleType>,
    pub rating: Option<RatingMode>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub q: Option<String>,
}

impl TitleParams {
    pub fn title_type(&self) -> TitleType {
        self.title_type.unwrap_or(TitleType::Manhwa)
    }

    pub fn rating(&self) -> RatingMode {
        self.rating.unwrap_or_default()
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

#[derive(Deserialize)]
pub struct ChapterParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub lang: Option<String>,
}

#[derive(Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub data_saver: bool,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// `CatalogError` as an HTTP response
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            CatalogError::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
            CatalogError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Network {
                status: Some(status),
                ..
            } if (400..500).contains(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.0.code(),
            message: self.0.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = self.0.retry_after() {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use super::AppState;
    use crate::api::client::CatalogClient;
    use crate::api::endpoints::CatalogApi;
    use crate::api::routes::create_router;
    use crate::config::{ClientSettings, ServerSettings};
    use crate::http::ProxyEndpoint;
    use crate::http::testing::ScriptedFetcher;

    pub(crate) fn router(fetcher: Arc<ScriptedFetcher>, admin_token: Option<&str>) -> Router {
        let settings = ClientSettings {
            base_url: "https://api.test".to_string(),
            proxies: vec![ProxyEndpoint::Direct],
            ..ClientSettings::default()
        };
        let client = CatalogClient::with_fetcher(&settings, fetcher);
        let state = AppState {
            api: CatalogApi::new(Arc::new(client)),
            server: ServerSettings {
                admin_token: admin_token.map(str::to_string),
            },
        };
        create_router(Arc::new(state))
    }

    pub(crate) async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub(crate) fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (CatalogError::rate_limited(Some("5")), StatusCode::TOO_MANY_REQUESTS),
            (
                CatalogError::InvalidId {
                    field: "manga ID".to_string(),
                    value: "x".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (CatalogError::http_status(404, "Not Found"), StatusCode::NOT_FOUND),
            (CatalogError::http_status(503, "Unavailable"), StatusCode::BAD_GATEWAY),
            (CatalogError::network("connection reset"), StatusCode::BAD_GATEWAY),
            (CatalogError::decode("eof"), StatusCode::BAD_GATEWAY),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).status_code(), expected);
        }
    }

    #[test]
    fn test_rate_limit_sets_retry_after_header() {
        let response = ApiError(CatalogError::rate_limited(Some("12"))).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "12");
    }

    #[test]
    fn test_title_params_defaults() {
        let params = TitleParams {
            title_type: None,
            rating: None,
            limit: Some(500),
            offset: None,
            q: None,
        };
        assert_eq!(params.title_type(), TitleType::Manhwa);
        assert_eq!(params.rating(), RatingMode::All);
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);
    }
}
