pub mod client;
pub mod display_stats;
pub mod endpoints;
pub mod handlers;
pub mod helpers;
pub mod query;
pub mod routes;
pub mod types;

pub use client::{CatalogClient, RequestOptions};
pub use endpoints::CatalogApi;
pub use query::{QueryParams, build_resource_key};
