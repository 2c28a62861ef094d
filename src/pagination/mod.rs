//! Pagination module
//!
//! JazzHR pages are addressed by number in the URL path
//! (`<endpoint>/page/<n>/`) and carry at most 100 records. The API never
//! reports a total or a "has more" flag, so the only termination signal is
//! a page that comes back short.
//!
//! # Overview
//!
//! A `PageState` value is created at extraction start and threaded through
//! the loop: each processed page either yields the next state or ends the
//! run. Nothing is stored on the stream itself.

mod strategies;
mod types;

pub use strategies::FullPagePaginator;
pub use types::{NextPage, PageState, Paginator, PAGE_SIZE};

#[cfg(test)]
mod tests;
