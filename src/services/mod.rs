pub mod browse;
pub mod server;

pub use browse::{BrowseService, Listing};
pub use server::ServerService;
