use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, AppState, ChapterParams, PageParams};
use crate::api::endpoints::ChapterList;
use crate::api::helpers::page_urls;
use crate::api::types::{CatalogResponse, FetchChaptersParams, Manga};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPagesResponse {
    pub chapter_id: String,
    pub data_saver: bool,
    pub pages: Vec<String>,
}

pub async fn get_manga(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CatalogResponse<Manga>>, ApiError> {
    Ok(Json(state.api.fetch_manga_by_id(&id).await?))
}

pub async fn get_chapters(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ChapterParams>,
) -> Result<Json<ChapterList>, ApiError> {
    let mut request = FetchChaptersParams::new(id).page(
        params.limit.unwrap_or(100).clamp(1, 500),
        params.offset.unwrap_or(0),
    );
    if let Some(lang) = params.lang {
        request.translated_language = vec![lang];
    }

    Ok(Json(state.api.fetch_manga_chapters(&request).await?))
}

pub async fn get_chapter_pages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<ChapterPagesResponse>, ApiError> {
    let pages = state.api.fetch_chapter_pages(&id).await?;
    let files = if params.data_saver {
        &pages.chapter.data_saver
    } else {
        &pages.chapter.data
    };

    Ok(Json(ChapterPagesResponse {
        pages: page_urls(&pages.base_url, &pages.chapter.hash, files, params.data_saver),
        chapter_id: id,
        data_saver: params.data_saver,
    }))
}
