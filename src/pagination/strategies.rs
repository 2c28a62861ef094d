//! Pagination strategy implementations

use super::types::{Paginator, PAGE_SIZE};

/// Page-number pagination that continues only after a full page
///
/// A page is full when it holds exactly `page_size` records. When the last
/// populated page is exactly full, one extra request is made and comes back
/// empty; that request is what ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullPagePaginator {
    /// Number of records in a full page
    pub page_size: usize,
}

impl Default for FullPagePaginator {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
        }
    }
}

impl FullPagePaginator {
    /// Create a paginator with the API page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paginator with a custom page size
    pub fn with_page_size(page_size: usize) -> Self {
        Self { page_size }
    }
}

impl Paginator for FullPagePaginator {
    fn page_was_full(&self, records_count: usize) -> bool {
        records_count == self.page_size
    }
}
