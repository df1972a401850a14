use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::types::{
    ADULT_RATINGS, CoverSize, Manga, NORMAL_RATINGS, RatingMode, TitleType,
};
use crate::errors::CatalogError;

const COVER_HOST: &str = "https://uploads.mangadex.org/covers";
const PLACEHOLDER_COVER: &str = "/placeholder.svg";

static UUID_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-f0-9]{8}-[a-f0-9]{4}-4[a-f0-9]{3}-[89ab][a-f0-9]{3}-[a-f0-9]{12}$")
        .expect("UUID pattern is valid")
});

// --- Cover URL ---

pub fn cover_url(manga: &Manga, size: CoverSize) -> String {
    let file_name = manga
        .relationships
        .iter()
        .find(|r| r.kind == "cover_art")
        .and_then(|r| r.attributes.as_ref())
        .and_then(|a| a.file_name.as_deref());

    let Some(file_name) = file_name else {
        return PLACEHOLDER_COVER.to_string();
    };

    let suffix = match size {
        CoverSize::Small => ".256.jpg",
        CoverSize::Medium => ".512.jpg",
        CoverSize::Large => "",
    };
    format!("{}/{}/{}{}", COVER_HOST, manga.id, file_name, suffix)
}

// --- Relationship Extractors ---

pub fn author_name(manga: &Manga) -> String {
    related_name(manga, "author").unwrap_or_else(|| "Unknown Author".to_string())
}

pub fn artist_name(manga: &Manga) -> Option<String> {
    related_name(manga, "artist")
}

fn related_name(manga: &Manga, kind: &str) -> Option<String> {
    manga
        .relationships
        .iter()
        .find(|r| r.kind == kind)
        .and_then(|r| r.attributes.as_ref())
        .and_then(|a| a.name.clone())
        .filter(|name| !name.is_empty())
}

// --- Title & Description ---

/// Title in the preferred language, falling back to en, ko, ja, then anything
pub fn title(manga: &Manga, preferred_lang: Option<&str>) -> String {
    let titles = &manga.attributes.title;

    preferred_lang
        .and_then(|lang| titles.get(lang))
        .or_else(|| titles.get("en"))
        .or_else(|| titles.get("ko"))
        .or_else(|| titles.get("ja"))
        .or_else(|| titles.values().next())
        .filter(|t| !t.is_empty())
        .cloned()
        .unwrap_or_else(|| "Unknown Title".to_string())
}

pub fn alt_titles(manga: &Manga) -> Vec<String> {
    manga
        .attributes
        .alt_titles
        .iter()
        .flat_map(|titles| titles.values())
        .filter(|t| !t.is_empty())
        .cloned()
        .collect()
}

pub fn description(manga: &Manga, preferred_lang: Option<&str>) -> String {
    let fallback = "No description available.";
    let Some(desc) = manga.attributes.description.as_ref() else {
        return fallback.to_string();
    };

    preferred_lang
        .and_then(|lang| desc.get(lang))
        .or_else(|| desc.get("en"))
        .or_else(|| desc.values().next())
        .filter(|d| !d.is_empty())
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

// --- Tags & Genres ---

pub fn genres(manga: &Manga, limit: usize) -> Vec<String> {
    manga
        .attributes
        .tags
        .iter()
        .filter_map(|tag| tag.attributes.name.get("en"))
        .take(limit)
        .cloned()
        .collect()
}

pub fn tag_ids(manga: &Manga) -> Vec<String> {
    manga.attributes.tags.iter().map(|tag| tag.id.clone()).collect()
}

pub fn has_tag(manga: &Manga, tag_id: &str) -> bool {
    manga.attributes.tags.iter().any(|tag| tag.id == tag_id)
}

// --- Status & Type ---

/// Simplified status shown to readers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderStatus {
    Ongoing,
    Completed,
    Hiatus,
}

pub fn map_status(status: &str) -> ReaderStatus {
    match status {
        "completed" => ReaderStatus::Completed,
        "hiatus" | "cancelled" => ReaderStatus::Hiatus,
        _ => ReaderStatus::Ongoing,
    }
}

pub fn is_manhwa(manga: &Manga) -> bool {
    manga.attributes.original_language == "ko"
}

pub fn is_manga(manga: &Manga) -> bool {
    manga.attributes.original_language == "ja"
}

pub fn is_adult_content(manga: &Manga) -> bool {
    ADULT_RATINGS.contains(&manga.attributes.content_rating.as_str())
}

// --- Query Builders ---

pub fn build_ratings(mode: RatingMode) -> Vec<&'static str> {
    match mode {
        RatingMode::Normal => NORMAL_RATINGS.to_vec(),
        RatingMode::Adult => ADULT_RATINGS.to_vec(),
        RatingMode::All => NORMAL_RATINGS.iter().chain(ADULT_RATINGS.iter()).copied().collect(),
    }
}

pub fn build_original_language(title_type: TitleType) -> &'static str {
    match title_type {
        TitleType::Manhwa => "ko",
        TitleType::Manga => "ja",
    }
}

// --- Page URL Builder ---

/// `{base_url}/{data|data-saver}/{hash}/{file}` for each page, in order
pub fn page_urls(base_url: &str, hash: &str, pages: &[String], data_saver: bool) -> Vec<String> {
    let quality = if data_saver { "data-saver" } else { "data" };
    pages
        .iter()
        .map(|page| format!("{}/{}/{}/{}", base_url, quality, hash, page))
        .collect()
}

// --- Chapter Numbers ---

pub fn parse_chapter_number(chapter: Option<&str>) -> Option<f64> {
    chapter?.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn format_chapter_number(chapter: Option<&str>) -> String {
    let Some(raw) = chapter.filter(|c| !c.is_empty()) else {
        return "N/A".to_string();
    };

    match parse_chapter_number(Some(raw)) {
        Some(n) if n.fract() == 0.0 => format!("{}", n as i64),
        Some(n) => format!("{:.1}", n),
        None => raw.to_string(),
    }
}

// --- Input Validation ---

/// Catalog ids are UUID v4
pub fn is_valid_id(id: &str) -> bool {
    UUID_V4.is_match(id)
}

pub fn validate_id(id: &str, field: &str) -> Result<(), CatalogError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(CatalogError::InvalidId {
            field: field.to_string(),
            value: id.to_string(),
        })
    }
}
