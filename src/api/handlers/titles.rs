use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState, ErrorBody, TitleParams};
use crate::api::endpoints::TitleList;
use crate::api::types::{CatalogResponse, Tag};

pub async fn get_popular(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TitleParams>,
) -> Result<Json<TitleList>, ApiError> {
    let titles = state
        .api
        .fetch_popular(params.title_type(), params.rating(), params.limit(), params.offset())
        .await?;
    Ok(Json(titles))
}

pub async fn get_latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TitleParams>,
) -> Result<Json<TitleList>, ApiError> {
    let titles = state
        .api
        .fetch_latest(params.title_type(), params.rating(), params.limit(), params.offset())
        .await?;
    Ok(Json(titles))
}

pub async fn search_titles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TitleParams>,
) -> Result<Response, ApiError> {
    let Some(query) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        let body = ErrorBody {
            error: "MISSING_QUERY",
            message: "query parameter `q` is required".to_string(),
        };
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    };

    let titles = state
        .api
        .search_titles(
            query,
            params.title_type(),
            params.rating(),
            params.limit(),
            params.offset(),
        )
        .await?;
    Ok(Json(titles).into_response())
}

pub async fn get_tags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CatalogResponse<Vec<Tag>>>, ApiError> {
    Ok(Json(state.api.fetch_tags().await?))
}

pub async fn get_titles_by_tag(
    State(state): State<Arc<AppState>>,
    Path(tag_id): Path<String>,
    Query(params): Query<TitleParams>,
) -> Result<Json<TitleList>, ApiError> {
    let titles = state
        .api
        .fetch_by_tag(
            &tag_id,
            params.title_type(),
            params.rating(),
            params.limit(),
            params.offset(),
        )
        .await?;
    Ok(Json(titles))
}
