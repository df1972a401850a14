use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const NORMAL_RATINGS: [&str; 2] = ["safe", "suggestive"];
pub const ADULT_RATINGS: [&str; 2] = ["erotica", "pornographic"];

/// Korean-origin manhwa or Japanese-origin manga
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    Manga,
    Manhwa,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RatingMode {
    #[default]
    All,
    Normal,
    Adult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum OrderBy {
    #[default]
    FollowedCount,
    LatestUploadedChapter,
    Rating,
    CreatedAt,
}

impl OrderBy {
    /// Server-side order parameter name
    pub fn param(&self) -> &'static str {
        match self {
            Self::FollowedCount => "order[followedCount]",
            Self::LatestUploadedChapter => "order[latestUploadedChapter]",
            Self::Rating => "order[rating]",
            Self::CreatedAt => "order[createdAt]",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Publication status filter values accepted by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Hiatus => "hiatus",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", name)
    }
}

// --- API Response Structures ---

/// Envelope wrapped around every catalog collection or entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse<T> {
    pub result: String,
    pub response: String,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

pub type LocalizedString = HashMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manga {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaAttributes {
    pub title: LocalizedString,
    #[serde(default)]
    pub alt_titles: Vec<LocalizedString>,
    #[serde(default)]
    pub description: Option<LocalizedString>,
    pub status: String,
    pub year: Option<i32>,
    pub content_rating: String,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<RelationshipAttributes>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipAttributes {
    pub name: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub attributes: TagAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAttributes {
    pub name: LocalizedString,
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub attributes: ChapterAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAttributes {
    pub volume: Option<String>,
    pub chapter: Option<String>,
    pub title: Option<String>,
    pub translated_language: String,
    pub publish_at: DateTime<Utc>,
    pub pages: u32,
}

/// Image host and file names for one chapter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPages {
    pub base_url: String,
    pub chapter: ChapterPageFiles,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPageFiles {
    pub hash: String,
    pub data: Vec<String>,
    pub data_saver: Vec<String>,
}

// --- Request Parameters ---

/// Filters for a title listing
#[derive(Debug, Clone)]
pub struct FetchTitlesParams {
    pub limit: u32,
    pub offset: u32,
    pub title_type: TitleType,
    pub rating: RatingMode,
    pub order: OrderBy,
    pub available_translated_language: Vec<String>,
    pub included_tags: Vec<String>,
    pub excluded_tags: Vec<String>,
    pub title_query: Option<String>,
    pub status: Vec<PublicationStatus>,
    pub year: Option<i32>,
    pub has_available_chapters: bool,
}

impl FetchTitlesParams {
    pub fn new(title_type: TitleType) -> Self {
        Self {
            limit: 20,
            offset: 0,
            title_type,
            rating: RatingMode::All,
            order: OrderBy::FollowedCount,
            available_translated_language: vec!["en".to_string()],
            included_tags: Vec::new(),
            excluded_tags: Vec::new(),
            title_query: None,
            status: Vec::new(),
            year: None,
            has_available_chapters: true,
        }
    }

    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    pub fn rating(mut self, rating: RatingMode) -> Self {
        self.rating = rating;
        self
    }

    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    pub fn query(mut self, title: impl Into<String>) -> Self {
        self.title_query = Some(title.into());
        self
    }

    pub fn include_tag(mut self, tag_id: impl Into<String>) -> Self {
        self.included_tags.push(tag_id.into());
        self
    }
}

/// Filters for a chapter feed
#[derive(Debug, Clone)]
pub struct FetchChaptersParams {
    pub manga_id: String,
    pub limit: u32,
    pub offset: u32,
    pub translated_language: Vec<String>,
    pub rating: RatingMode,
    pub order_by_chapter: SortDirection,
    pub order_by_publish: SortDirection,
}

impl FetchChaptersParams {
    pub fn new(manga_id: impl Into<String>) -> Self {
        Self {
            manga_id: manga_id.into(),
            limit: 100,
            offset: 0,
            translated_language: vec!["en".to_string()],
            rating: RatingMode::All,
            order_by_chapter: SortDirection::Desc,
            order_by_publish: SortDirection::Desc,
        }
    }

    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}
