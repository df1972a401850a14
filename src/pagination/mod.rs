mod config;
mod iterator;

pub use config::PaginationConfig;
pub use iterator::{PageIterator, next_offset};
