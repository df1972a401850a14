pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod errors;
pub mod http;
pub mod pagination;
pub mod rate_limiter;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use std::future::Future;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::browse::{BrowseService, Listing};
use crate::services::server::ServerService;

pub use api::{CatalogApi, CatalogClient, RequestOptions};
pub use errors::CatalogError;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_browse<F, Fut>(lookup: F) -> Result<()>
where
    F: FnOnce(BrowseService) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    block_on(async move {
        let config = AppConfig::from_env();
        let service = BrowseService::new(&config)?;
        lookup(service).await
    })
}

pub fn handle_popular(listing: Listing) -> Result<()> {
    handle_browse(|service| async move { service.popular(listing).await })
}

pub fn handle_latest(listing: Listing) -> Result<()> {
    handle_browse(|service| async move { service.latest(listing).await })
}

pub fn handle_search(query: &str, listing: Listing) -> Result<()> {
    handle_browse(|service| async move { service.search(query, listing).await })
}

pub fn handle_manga(id: &str) -> Result<()> {
    handle_browse(|service| async move { service.manga(id).await })
}

pub fn handle_chapters(id: &str, max_pages: Option<usize>) -> Result<()> {
    handle_browse(|service| async move { service.chapters(id, max_pages).await })
}

pub fn handle_pages(id: &str, data_saver: bool) -> Result<()> {
    handle_browse(|service| async move { service.pages(id, data_saver).await })
}

pub fn handle_tags() -> Result<()> {
    handle_browse(|service| async move { service.tags().await })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn block_on<Fut>(future: Fut) -> Result<()>
where
    Fut: Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(future)
}
