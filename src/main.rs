use anyhow::Result;

use manhwa_catalog::cli::Command;
use manhwa_catalog::{
    handle_chapters, handle_completions, handle_latest, handle_manga, handle_pages,
    handle_popular, handle_search, handle_serve, handle_tags, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Popular { listing } => handle_popular(listing.into()),
        Command::Latest { listing } => handle_latest(listing.into()),
        Command::Search { query, listing } => handle_search(query, listing.into()),
        Command::Manga { id } => handle_manga(id),
        Command::Chapters { id, max_pages } => handle_chapters(id, *max_pages),
        Command::Pages { id, data_saver } => handle_pages(id, *data_saver),
        Command::Tags => handle_tags(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
