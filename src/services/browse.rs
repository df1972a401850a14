use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::sync::Arc;

use crate::api::client::CatalogClient;
use crate::api::display_stats::DisplayStats;
use crate::api::endpoints::{CatalogApi, TitleList};
use crate::api::helpers;
use crate::api::types::{Chapter, Manga, RatingMode, TitleType};
use crate::config::settings::AppConfig;
use crate::errors::lookup_context;
use crate::pagination::PaginationConfig;

/// Listing filters shared by the title subcommands
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    pub title_type: TitleType,
    pub rating: RatingMode,
    pub limit: u32,
    pub offset: u32,
}

/// One-shot catalog lookups printed to stdout
pub struct BrowseService {
    api: CatalogApi,
}

impl BrowseService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client =
            CatalogClient::new(&config.client).context("Failed to build catalog client")?;
        Ok(Self {
            api: CatalogApi::new(Arc::new(client)),
        })
    }

    pub async fn popular(&self, listing: Listing) -> Result<()> {
        let titles = self
            .api
            .fetch_popular(listing.title_type, listing.rating, listing.limit, listing.offset)
            .await
            .context("Failed to fetch popular titles")?;
        print_titles(&titles, listing.offset);
        Ok(())
    }

    pub async fn latest(&self, listing: Listing) -> Result<()> {
        let titles = self
            .api
            .fetch_latest(listing.title_type, listing.rating, listing.limit, listing.offset)
            .await
            .context("Failed to fetch latest titles")?;
        print_titles(&titles, listing.offset);
        Ok(())
    }

    pub async fn search(&self, query: &str, listing: Listing) -> Result<()> {
        let titles = self
            .api
            .search_titles(
                query,
                listing.title_type,
                listing.rating,
                listing.limit,
                listing.offset,
            )
            .await
            .with_context(|| lookup_context("search results", query))?;

        if titles.data.is_empty() {
            println!("{}", format!("No titles match \"{}\"", query).yellow());
            return Ok(());
        }
        print_titles(&titles, listing.offset);
        Ok(())
    }

    pub async fn manga(&self, id: &str) -> Result<()> {
        let response = self
            .api
            .fetch_manga_by_id(id)
            .await
            .with_context(|| lookup_context("manga", id))?;
        let manga = &response.data;
        let stats = DisplayStats::for_id(&manga.id);

        println!("{}", helpers::title(manga, None).bold());
        println!("  {} {}", "id:".dimmed(), manga.id);
        println!("  {} {}", "author:".dimmed(), helpers::author_name(manga));
        if let Some(artist) = helpers::artist_name(manga) {
            println!("  {} {}", "artist:".dimmed(), artist);
        }
        println!(
            "  {} {:?}{}",
            "status:".dimmed(),
            helpers::map_status(&manga.attributes.status),
            manga
                .attributes
                .year
                .map(|y| format!(" ({})", y))
                .unwrap_or_default()
        );
        println!("  {} {}", "genres:".dimmed(), helpers::genres(manga, 5).join(", "));
        println!(
            "  {} {} / {} views",
            "stats:".dimmed(),
            stats.rating,
            stats.views_label
        );
        println!("  {} {}", "cover:".dimmed(), helpers::cover_url(manga, Default::default()));
        println!();
        println!("{}", helpers::description(manga, None));
        Ok(())
    }

    pub async fn chapters(&self, manga_id: &str, max_pages: Option<usize>) -> Result<()> {
        let mut config = PaginationConfig::new();
        if let Some(max) = max_pages {
            config = config.with_max_pages(max);
        }

        let chapters = self
            .api
            .fetch_all_chapters(manga_id, config)
            .await
            .with_context(|| lookup_context("chapters", manga_id))?;

        for chapter in &chapters {
            println!("{}", chapter_line(chapter));
        }
        info!("{} chapters listed", chapters.len());
        Ok(())
    }

    pub async fn pages(&self, chapter_id: &str, data_saver: bool) -> Result<()> {
        let urls = self
            .api
            .fetch_chapter_page_urls(chapter_id, data_saver)
            .await
            .with_context(|| lookup_context("chapter pages", chapter_id))?;

        for url in urls {
            println!("{}", url);
        }
        Ok(())
    }

    pub async fn tags(&self) -> Result<()> {
        let tags = self.api.fetch_tags().await.context("Failed to fetch tags")?;

        for tag in &tags.data {
            let name = tag
                .attributes
                .name
                .get("en")
                .map(String::as_str)
                .unwrap_or("?");
            let group = tag.attributes.group.as_deref().unwrap_or("-");
            println!("{} {} {}", tag.id.dimmed(), name.bold(), format!("[{}]", group).cyan());
        }
        Ok(())
    }
}

fn print_titles(titles: &TitleList, offset: u32) {
    for (i, manga) in titles.data.iter().enumerate() {
        println!("{}", title_line(offset as usize + i + 1, manga));
    }
    if let Some(total) = titles.total {
        println!(
            "{}",
            format!("showing {} of {}", titles.data.len(), total).dimmed()
        );
    }
}

fn title_line(rank: usize, manga: &Manga) -> String {
    let kind = if helpers::is_manhwa(manga) { "manhwa" } else { "manga" };
    let mut line = format!(
        "{:>3}. {} {} {}",
        rank,
        helpers::title(manga, None).bold(),
        format!("by {}", helpers::author_name(manga)).dimmed(),
        format!("[{}]", kind).cyan()
    );
    if helpers::is_adult_content(manga) {
        line.push_str(&format!(" {}", "18+".red()));
    }
    line
}

fn chapter_line(chapter: &Chapter) -> String {
    let attrs = &chapter.attributes;
    let number = helpers::format_chapter_number(attrs.chapter.as_deref());
    let title = attrs.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("");

    format!(
        "{} {:<30} {} {}",
        format!("Ch. {:>6}", number).green(),
        title,
        attrs.publish_at.format("%Y-%m-%d").to_string().dimmed(),
        chapter.id.dimmed()
    )
}
