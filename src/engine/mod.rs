//! Execution engine module
//!
//! Page-by-page extraction and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `HttpPager` - Fetches one page per request and decides whether another follows
//! - `SyncEngine` - Turns selected streams into a lazy sequence of protocol messages
//! - `SyncStats` - Counters collected while a read is consumed

mod pager;
mod types;

pub use pager::{HttpPager, Page};
pub use types::{SyncConfig, SyncStats};

use crate::connector::{Message, MessageStream, StreamStatus};
use crate::error::Result;
use crate::pagination::PageState;
use crate::streams::JazzHrStream;
use futures::StreamExt;
use tracing::{info, warn};

/// Where a single stream's read currently stands
#[derive(Debug, Clone, Copy)]
enum Phase {
    Start,
    Fetch(PageState),
    Finish,
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Progress {
    phase: Phase,
    records: u64,
    pages: u32,
}

/// Sync engine for orchestrating data extraction
#[derive(Debug, Clone)]
pub struct SyncEngine {
    pager: HttpPager,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(pager: HttpPager) -> Self {
        Self { pager }
    }

    /// Get the pager
    pub fn pager(&self) -> &HttpPager {
        &self.pager
    }

    /// Read the given streams one after another
    ///
    /// A failing stream yields its error and an `Incomplete` status, then
    /// the next stream starts.
    pub fn read(&self, streams: Vec<JazzHrStream>) -> MessageStream {
        let engine = self.clone();
        futures::stream::iter(streams)
            .flat_map(move |stream| engine.stream_messages(stream))
            .boxed()
    }

    /// Messages for one stream: status, logs and one record message per record
    ///
    /// Nothing is requested until the returned stream is polled, and page
    /// N+1 is requested only after every record of page N has been yielded.
    pub fn stream_messages(&self, stream: JazzHrStream) -> MessageStream {
        let pager = self.pager.clone();
        let progress = Progress {
            phase: Phase::Start,
            records: 0,
            pages: 0,
        };

        futures::stream::unfold(progress, move |mut progress| {
            let pager = pager.clone();
            let stream = stream.clone();
            async move {
                let name = stream.name();
                let items: Vec<Result<Message>> = match progress.phase {
                    Phase::Start => {
                        info!(stream = name, "Starting sync");
                        progress.phase = Phase::Fetch(stream.initial_state());
                        vec![
                            Ok(Message::stream_status(name, StreamStatus::Started)),
                            Ok(Message::info(format!("Starting sync for stream: {name}"))),
                        ]
                    }
                    Phase::Fetch(state) => match pager.fetch_page(&stream, state).await {
                        Ok(page) => {
                            progress.pages += 1;
                            progress.records += page.records.len() as u64;
                            progress.phase = match pager.next_state(&page) {
                                Some(next) => Phase::Fetch(next),
                                None => Phase::Finish,
                            };
                            page.records
                                .into_iter()
                                .map(|record| Ok(Message::record(name, record)))
                                .collect()
                        }
                        Err(e) => {
                            warn!(stream = name, page = state.page, "Stream failed: {e}");
                            progress.phase = Phase::Done;
                            vec![
                                Err(e),
                                Ok(Message::stream_status(name, StreamStatus::Incomplete)),
                            ]
                        }
                    },
                    Phase::Finish => {
                        info!(
                            stream = name,
                            records = progress.records,
                            pages = progress.pages,
                            "Completed sync"
                        );
                        progress.phase = Phase::Done;
                        vec![
                            Ok(Message::info(format!(
                                "Completed sync for {name}: {} records in {} pages",
                                progress.records, progress.pages
                            ))),
                            Ok(Message::stream_status(
                                name,
                                StreamStatus::Complete {
                                    records: progress.records,
                                    pages: progress.pages,
                                },
                            )),
                        ]
                    }
                    Phase::Done => return None,
                };
                Some((futures::stream::iter(items), progress))
            }
        })
        .flatten()
        .boxed()
    }
}
