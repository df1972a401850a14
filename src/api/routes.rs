use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    admin::admin_clear_cache,
    manga::{get_chapter_pages, get_chapters, get_manga},
    titles::{get_latest, get_popular, get_tags, get_titles_by_tag, search_titles},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/titles/popular", get(get_popular))
        .route("/api/titles/latest", get(get_latest))
        .route("/api/titles/search", get(search_titles))
        .route("/api/tags", get(get_tags))
        .route("/api/tags/:id/titles", get(get_titles_by_tag))
        .route("/api/manga/:id", get(get_manga))
        .route("/api/manga/:id/chapters", get(get_chapters))
        .route("/api/chapter/:id/pages", get(get_chapter_pages))
        .route("/api/admin/cache/clear", post(admin_clear_cache))
        .with_state(state)
}
