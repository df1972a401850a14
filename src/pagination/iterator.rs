use super::config::PaginationConfig;

/// Walks an offset/limit collection until `total` items have been seen
pub struct PageIterator {
    current_page: usize,
    fetched: u32,
    total: Option<u32>,
    exhausted: bool,
    config: PaginationConfig,
}

impl PageIterator {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            current_page: 1,
            fetched: 0,
            total: None,
            exhausted: false,
            config,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn limit(&self) -> u32 {
        self.config.page_size
    }

    pub fn offset(&self) -> u32 {
        self.fetched
    }

    pub fn has_reached_max(&self) -> bool {
        self.config
            .max_pages
            .is_some_and(|max| self.current_page > max)
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted && !self.has_reached_max() && next_offset(self.fetched, self.total).is_some()
    }

    /// Record a received page of `received` items out of `total`
    pub fn advance(&mut self, received: usize, total: Option<u32>) {
        self.fetched += received as u32;
        self.total = total.or(self.total);
        self.exhausted = received == 0;
        self.current_page += 1;
    }
}

/// Offset of the next page, or `None` once `total` items have been fetched.
///
/// An unknown total means there may be more.
pub fn next_offset(fetched: u32, total: Option<u32>) -> Option<u32> {
    match total {
        Some(total) if fetched >= total => None,
        _ => Some(fetched),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_offset() {
        assert_eq!(next_offset(0, None), Some(0));
        assert_eq!(next_offset(20, Some(45)), Some(20));
        assert_eq!(next_offset(45, Some(45)), None);
    }

    #[test]
    fn test_walks_until_total() {
        let mut pages = PageIterator::new(PaginationConfig::new().with_page_size(20));
        assert!(pages.has_more());
        assert_eq!((pages.offset(), pages.limit()), (0, 20));

        pages.advance(20, Some(45));
        assert_eq!(pages.offset(), 20);
        pages.advance(20, Some(45));
        assert!(pages.has_more());
        pages.advance(5, Some(45));
        assert!(!pages.has_more());
        assert_eq!(pages.current_page(), 4);
    }

    #[test]
    fn test_stops_at_max_pages() {
        let mut pages = PageIterator::new(PaginationConfig::new().with_max_pages(2));
        pages.advance(100, Some(1000));
        assert!(pages.has_more());
        pages.advance(100, Some(1000));
        assert!(pages.has_reached_max());
        assert!(!pages.has_more());
    }

    #[test]
    fn test_empty_page_ends_walk() {
        let mut pages = PageIterator::new(PaginationConfig::new());
        pages.advance(0, None);
        assert!(!pages.has_more());
    }
}
