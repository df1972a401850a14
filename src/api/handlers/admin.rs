use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use log::info;
use serde_json::json;
use std::sync::Arc;

use super::AppState;

pub async fn admin_clear_cache(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = state.server.admin_token.as_deref() {
        let auth_header = headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());
        if auth_header != Some(format!("Bearer {}", token).as_str()) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    let client = state.api.client();
    let cleared = client.cache_len();
    client.clear_cache();
    info!("Admin cleared {} cached responses", cleared);

    Json(json!({
        "cleared": cleared,
        "inFlight": client.in_flight(),
    }))
    .into_response()
}
