use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::api::types::{RatingMode, TitleType};
use crate::services::Listing;

#[derive(Parser, Debug)]
#[command(author, version, about = "manhwa catalog client and JSON API")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ListingArgs {
    /// Origin of the titles
    #[arg(short = 't', long = "type", value_enum, default_value_t = TitleType::Manhwa)]
    pub title_type: TitleType,
    /// Content rating filter
    #[arg(short, long, value_enum, default_value_t = RatingMode::All)]
    pub rating: RatingMode,
    #[arg(short, long, default_value_t = 20)]
    pub limit: u32,
    #[arg(short, long, default_value_t = 0)]
    pub offset: u32,
}

impl From<&ListingArgs> for Listing {
    fn from(args: &ListingArgs) -> Self {
        Self {
            title_type: args.title_type,
            rating: args.rating,
            limit: args.limit,
            offset: args.offset,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the JSON API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// List the most followed titles
    Popular {
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// List titles with the most recent chapter uploads
    Latest {
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Search titles by name
    Search {
        query: String,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Show one title
    Manga { id: String },
    /// List every English chapter of a title
    Chapters {
        id: String,
        /// Stop after this many feed pages
        #[arg(long)]
        max_pages: Option<usize>,
    },
    /// Print the page image URLs of a chapter
    Pages {
        id: String,
        /// Use compressed images
        #[arg(long)]
        data_saver: bool,
    },
    /// List catalog tags
    Tags,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
