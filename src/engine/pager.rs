//! Page-by-page retrieval for one stream

use crate::decode::{JsonArrayDecoder, RecordDecoder};
use crate::error::Result;
use crate::http::{redact_query, HttpClient, RequestConfig};
use crate::pagination::{FullPagePaginator, PageState, Paginator};
use crate::streams::JazzHrStream;
use crate::types::Record;
use futures::stream::{BoxStream, StreamExt};
use tracing::debug;

/// One fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Which page this is
    pub state: PageState,
    /// Records in API response order
    pub records: Vec<Record>,
    /// Whether the page held a full page of records
    pub page_was_full: bool,
}

/// Issues one GET per page and decides whether another page follows
#[derive(Debug, Clone)]
pub struct HttpPager {
    client: HttpClient,
    paginator: FullPagePaginator,
    decoder: JsonArrayDecoder,
}

impl HttpPager {
    /// Create a pager with the API page size
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            paginator: FullPagePaginator::new(),
            decoder: JsonArrayDecoder::new(),
        }
    }

    /// Replace the paginator
    #[must_use]
    pub fn with_paginator(mut self, paginator: FullPagePaginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Fetch and decode the page described by `state`
    ///
    /// Non-2xx responses and bodies that are not a JSON array fail; neither
    /// is retried.
    pub async fn fetch_page(&self, stream: &JazzHrStream, state: PageState) -> Result<Page> {
        let path = stream.path(state.page);
        let endpoint = redact_query(&path);

        let request = RequestConfig::new().headers(stream.request_headers());
        let body = self.client.get_text(&path, request).await?;

        let records = self.decoder.decode(&endpoint, &body)?;
        let page_was_full = self.paginator.page_was_full(records.len());

        debug!(
            stream = stream.name(),
            page = state.page,
            records = records.len(),
            page_was_full,
            "Fetched page"
        );

        Ok(Page {
            state,
            records,
            page_was_full,
        })
    }

    /// The page to request after `page`, if any
    pub fn next_state(&self, page: &Page) -> Option<PageState> {
        self.paginator
            .process_page(page.state, page.records.len())
            .state()
    }

    /// Fetch every page of a stream and concatenate the records
    pub async fn fetch_all(&self, stream: &JazzHrStream) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut state = Some(stream.initial_state());

        while let Some(current) = state {
            let page = self.fetch_page(stream, current).await?;
            state = self.next_state(&page);
            records.extend(page.records);
        }

        Ok(records)
    }

    /// Lazily fetch the pages of a stream
    ///
    /// Each poll requests at most one page. The stream ends after the first
    /// short page, or right after yielding an error.
    pub fn pages(&self, stream: JazzHrStream) -> BoxStream<'static, Result<Page>> {
        let pager = self.clone();
        let initial = Some(stream.initial_state());

        futures::stream::try_unfold(initial, move |state| {
            let pager = pager.clone();
            let stream = stream.clone();
            async move {
                let Some(state) = state else {
                    return Ok(None);
                };
                let page = pager.fetch_page(&stream, state).await?;
                let next = pager.next_state(&page);
                Ok(Some((page, next)))
            }
        })
        .boxed()
    }
}
