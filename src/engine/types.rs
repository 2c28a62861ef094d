//! Engine types
//!
//! Read configuration and statistics.

use crate::connector::{Message, StreamStatus};

/// Configuration for a read
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Stop the whole read at the first failing stream
    pub fail_fast: bool,
    /// Streams to read, by name (empty = all)
    pub streams: Vec<String>,
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fail fast mode
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Restrict the read to the named streams
    #[must_use]
    pub fn with_streams<I, S>(mut self, streams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.streams = streams.into_iter().map(Into::into).collect();
        self
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Total records synced
    pub records_synced: u64,
    /// Total pages fetched by completed streams
    pub pages_fetched: u64,
    /// Streams that completed
    pub streams_synced: usize,
    /// Streams that stopped on an error
    pub streams_failed: usize,
    /// Errors encountered
    pub errors: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Update counters from an emitted message
    pub fn observe(&mut self, message: &Message) {
        match message {
            Message::Record { .. } => self.records_synced += 1,
            Message::StreamStatus {
                status: StreamStatus::Complete { pages, .. },
                ..
            } => {
                self.streams_synced += 1;
                self.pages_fetched += u64::from(*pages);
            }
            Message::StreamStatus {
                status: StreamStatus::Incomplete,
                ..
            } => self.streams_failed += 1,
            Message::StreamStatus { .. } | Message::Log { .. } => {}
        }
    }

    /// Add an error
    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    /// Whether any stream failed
    pub fn has_failures(&self) -> bool {
        self.streams_failed > 0 || self.errors > 0
    }
}
