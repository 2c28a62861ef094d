//! Pagination types and traits

/// Maximum number of records the API returns per page
pub const PAGE_SIZE: usize = 100;

/// Position of a stream run: which endpoint, which page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Endpoint name (e.g. `applicants2jobs`)
    pub endpoint: &'static str,
    /// Current page number, starting at 1
    pub page: u32,
}

impl PageState {
    /// State for the first page of an endpoint
    pub fn first(endpoint: &'static str) -> Self {
        Self { endpoint, page: 1 }
    }

    /// State for the following page
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }
}

/// Result of processing one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Another page may follow; request this one
    Continue(PageState),
    /// No more pages
    Done,
}

impl NextPage {
    /// The state to fetch next, if any
    pub fn state(self) -> Option<PageState> {
        match self {
            Self::Continue(state) => Some(state),
            Self::Done => None,
        }
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Whether a page with `records_count` records may be followed by another
    fn page_was_full(&self, records_count: usize) -> bool;

    /// Decide what to fetch after the page described by `state`
    fn process_page(&self, state: PageState, records_count: usize) -> NextPage {
        if self.page_was_full(records_count) {
            NextPage::Continue(state.next())
        } else {
            NextPage::Done
        }
    }
}
