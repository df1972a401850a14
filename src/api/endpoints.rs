use log::info;
use std::sync::Arc;

use super::client::{CatalogClient, RequestOptions};
use super::helpers::{build_original_language, build_ratings, page_urls};
use super::query::QueryParams;
use super::types::{
    CatalogResponse, Chapter, ChapterPages, FetchChaptersParams, FetchTitlesParams, Manga,
    OrderBy, RatingMode, Tag, TitleType,
};
use crate::errors::CatalogError;
use crate::pagination::{PageIterator, PaginationConfig};

pub type TitleList = CatalogResponse<Vec<Manga>>;
pub type ChapterList = CatalogResponse<Vec<Chapter>>;

const RELATED_INCLUDES: [&str; 3] = ["cover_art", "author", "artist"];

/// Typed catalog endpoints built on a shared `CatalogClient`
#[derive(Clone)]
pub struct CatalogApi {
    client: Arc<CatalogClient>,
}

impl CatalogApi {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    // --- Titles ---

    pub async fn fetch_titles(&self, params: &FetchTitlesParams) -> Result<TitleList, CatalogError> {
        let query = Self::build_titles_query(params);
        self.client
            .request("/manga", Some(&query), RequestOptions::default())
            .await
    }

    pub async fn search_titles(
        &self,
        query: &str,
        title_type: TitleType,
        rating: RatingMode,
        limit: u32,
        offset: u32,
    ) -> Result<TitleList, CatalogError> {
        let params = FetchTitlesParams::new(title_type)
            .rating(rating)
            .order(OrderBy::FollowedCount)
            .query(query)
            .page(limit, offset);
        self.fetch_titles(&params).await
    }

    pub async fn fetch_popular(
        &self,
        title_type: TitleType,
        rating: RatingMode,
        limit: u32,
        offset: u32,
    ) -> Result<TitleList, CatalogError> {
        let params = FetchTitlesParams::new(title_type)
            .rating(rating)
            .order(OrderBy::FollowedCount)
            .page(limit, offset);
        self.fetch_titles(&params).await
    }

    pub async fn fetch_latest(
        &self,
        title_type: TitleType,
        rating: RatingMode,
        limit: u32,
        offset: u32,
    ) -> Result<TitleList, CatalogError> {
        let params = FetchTitlesParams::new(title_type)
            .rating(rating)
            .order(OrderBy::LatestUploadedChapter)
            .page(limit, offset);
        self.fetch_titles(&params).await
    }

    pub async fn fetch_by_tag(
        &self,
        tag_id: &str,
        title_type: TitleType,
        rating: RatingMode,
        limit: u32,
        offset: u32,
    ) -> Result<TitleList, CatalogError> {
        let params = FetchTitlesParams::new(title_type)
            .rating(rating)
            .order(OrderBy::FollowedCount)
            .include_tag(tag_id)
            .page(limit, offset);
        self.fetch_titles(&params).await
    }

    pub async fn fetch_manga_by_id(&self, id: &str) -> Result<CatalogResponse<Manga>, CatalogError> {
        let mut query = QueryParams::new();
        query.append_all("includes[]", RELATED_INCLUDES);

        self.client
            .request(
                &format!("/manga/{}", path_segment(id)),
                Some(&query),
                RequestOptions::default(),
            )
            .await
    }

    pub async fn fetch_tags(&self) -> Result<CatalogResponse<Vec<Tag>>, CatalogError> {
        self.client
            .request("/manga/tag", None, RequestOptions::default())
            .await
    }

    // --- Chapters ---

    pub async fn fetch_manga_chapters(
        &self,
        params: &FetchChaptersParams,
    ) -> Result<ChapterList, CatalogError> {
        let query = Self::build_chapters_query(params);

        self.client
            .request(
                &format!("/manga/{}/feed", path_segment(&params.manga_id)),
                Some(&query),
                RequestOptions::default(),
            )
            .await
    }

    /// Every chapter of a title, one feed page at a time
    pub async fn fetch_all_chapters(
        &self,
        manga_id: &str,
        config: PaginationConfig,
    ) -> Result<Vec<Chapter>, CatalogError> {
        let mut pages = PageIterator::new(config);
        let mut chapters = Vec::new();

        while pages.has_more() {
            let params = FetchChaptersParams::new(manga_id).page(pages.limit(), pages.offset());
            let page = self.fetch_manga_chapters(&params).await?;

            pages.advance(page.data.len(), page.total);
            chapters.extend(page.data);
        }

        info!(
            "Fetched {} chapters for manga {} in {} pages",
            chapters.len(),
            manga_id,
            pages.current_page() - 1
        );
        Ok(chapters)
    }

    /// Image host and page files for a chapter; never cached, the host is short-lived
    pub async fn fetch_chapter_pages(&self, chapter_id: &str) -> Result<ChapterPages, CatalogError> {
        self.client
            .request(
                &format!("/at-home/server/{}", path_segment(chapter_id)),
                None,
                RequestOptions::skip_cache(),
            )
            .await
    }

    pub async fn fetch_chapter_page_urls(
        &self,
        chapter_id: &str,
        data_saver: bool,
    ) -> Result<Vec<String>, CatalogError> {
        let pages = self.fetch_chapter_pages(chapter_id).await?;
        let files = if data_saver {
            &pages.chapter.data_saver
        } else {
            &pages.chapter.data
        };
        Ok(page_urls(&pages.base_url, &pages.chapter.hash, files, data_saver))
    }

    // --- Query Builders ---

    pub fn build_titles_query(params: &FetchTitlesParams) -> QueryParams {
        let mut q = QueryParams::new();
        q.set("limit", params.limit).set("offset", params.offset);
        q.append_all("includes[]", RELATED_INCLUDES);
        q.append("originalLanguage[]", build_original_language(params.title_type));
        q.append_all("contentRating[]", build_ratings(params.rating));
        q.append_all(
            "availableTranslatedLanguage[]",
            &params.available_translated_language,
        );
        q.append_all("includedTags[]", &params.included_tags);
        q.append_all("excludedTags[]", &params.excluded_tags);
        q.append_all("status[]", &params.status);

        if let Some(year) = params.year {
            q.set("year", year);
        }
        if params.has_available_chapters {
            q.set("hasAvailableChapters", "true");
        }
        if let Some(title) = params.title_query.as_deref().filter(|t| !t.is_empty()) {
            q.set("title", title);
        }

        q.append(params.order.param(), "desc");
        q
    }

    pub fn build_chapters_query(params: &FetchChaptersParams) -> QueryParams {
        let mut q = QueryParams::new();
        q.set("limit", params.limit).set("offset", params.offset);
        q.append_all("contentRating[]", build_ratings(params.rating));
        q.append_all("translatedLanguage[]", &params.translated_language);
        q.append("order[chapter]", params.order_by_chapter);
        q.append("order[publishAt]", params.order_by_publish);
        q
    }
}

/// Ids go into the path as one percent-encoded segment
fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PublicationStatus;

    #[test]
    fn test_titles_query_defaults() {
        let params = FetchTitlesParams::new(TitleType::Manhwa);
        let q = CatalogApi::build_titles_query(&params);

        assert_eq!(q.get("limit"), Some("20"));
        assert_eq!(q.get("offset"), Some("0"));
        assert_eq!(q.get_all("includes[]"), vec!["cover_art", "author", "artist"]);
        assert_eq!(q.get_all("originalLanguage[]"), vec!["ko"]);
        assert_eq!(q.get_all("contentRating[]").len(), 4);
        assert_eq!(q.get_all("availableTranslatedLanguage[]"), vec!["en"]);
        assert_eq!(q.get("hasAvailableChapters"), Some("true"));
        assert_eq!(q.get("order[followedCount]"), Some("desc"));
        assert_eq!(q.get("title"), None);
    }

    #[test]
    fn test_titles_query_filters() {
        let mut params = FetchTitlesParams::new(TitleType::Manga)
            .rating(RatingMode::Adult)
            .order(OrderBy::LatestUploadedChapter)
            .query("berserk")
            .include_tag("tag-a");
        params.excluded_tags.push("tag-b".to_string());
        params.status = vec![PublicationStatus::Ongoing, PublicationStatus::Hiatus];
        params.year = Some(1989);
        params.has_available_chapters = false;

        let q = CatalogApi::build_titles_query(&params);

        assert_eq!(q.get_all("originalLanguage[]"), vec!["ja"]);
        assert_eq!(q.get_all("contentRating[]"), vec!["erotica", "pornographic"]);
        assert_eq!(q.get_all("includedTags[]"), vec!["tag-a"]);
        assert_eq!(q.get_all("excludedTags[]"), vec!["tag-b"]);
        assert_eq!(q.get_all("status[]"), vec!["ongoing", "hiatus"]);
        assert_eq!(q.get("year"), Some("1989"));
        assert_eq!(q.get("hasAvailableChapters"), None);
        assert_eq!(q.get("title"), Some("berserk"));
        assert_eq!(q.get("order[latestUploadedChapter]"), Some("desc"));
        assert_eq!(q.get("order[followedCount]"), None);
    }

    #[test]
    fn test_chapters_query() {
        let params = FetchChaptersParams::new("32d76d19-8a05-4db0-9fc2-e0b0648fe9d0").page(50, 100);
        let q = CatalogApi::build_chapters_query(&params);

        assert_eq!(q.get("limit"), Some("50"));
        assert_eq!(q.get("offset"), Some("100"));
        assert_eq!(q.get_all("translatedLanguage[]"), vec!["en"]);
        assert_eq!(q.get("order[chapter]"), Some("desc"));
        assert_eq!(q.get("order[publishAt]"), Some("desc"));
    }

    #[test]
    fn test_path_segment_keeps_ids_in_one_segment() {
        assert_eq!(path_segment("abc123"), "abc123");
        assert_eq!(path_segment("../tag?x=1"), "..%2Ftag%3Fx%3D1");
    }
}
