// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # JazzHR source connector
//!
//! Extracts every record type the JazzHR recruiting API exposes (activities,
//! applicants, jobs, users, ...) as a sequence of streams.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use source_jazzhr::{Connector, ConfiguredCatalog, JazzHrSource, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let source = JazzHrSource::new()?;
//!     let config = serde_json::json!({ "api_key": "..." });
//!
//!     let status = source.check(&config).await?;
//!     let catalog = source.discover(&config).await?;
//!
//!     let mut messages = source
//!         .read(&config, &ConfiguredCatalog::from_catalog(&catalog))
//!         .await?;
//!     while let Some(msg) = messages.next().await {
//!         // Process messages
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        JazzHrSource                          │
//! │  spec()   check() → CheckResult   discover() → Catalog       │
//! │  read(catalog) → Stream<Message>                             │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴───────┬──────────────┬─────────┐
//! │   Streams    │     SyncEngine       │  HttpPager   │  HTTP   │
//! ├──────────────┼──────────────────────┼──────────────┼─────────┤
//! │ 11 endpoints │ status, logs,        │ page/N/      │ OAuth   │
//! │ primary key  │ records in order     │ full = 100   │ header  │
//! └──────────────┴──────────────────────┴──────────────┴─────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connector configuration and catalogs
pub mod config;

/// Single-attempt HTTP client
pub mod http;

/// Page-number pagination
pub mod pagination;

/// Response decoding
pub mod decode;

/// Stream table and stream definitions
pub mod streams;

/// Page retrieval and read orchestration
pub mod engine;

/// Connector trait and protocol messages
pub mod connector;

/// The JazzHR source
pub mod source;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{Catalog, ConfiguredCatalog, JazzHrConfig};
pub use connector::{CheckFailure, CheckResult, Connector, Message, MessageStream, StreamStatus};
pub use error::{Error, Result};
pub use source::JazzHrSource;
pub use streams::{JazzHrStream, StreamDescriptor, STREAM_DESCRIPTORS};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
