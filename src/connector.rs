//! Connector trait and protocol messages
//!
//! Defines the `Connector` interface a harness drives (spec, check,
//! discover, read) and the messages a read emits.

use crate::config::{Catalog, ConfiguredCatalog, SpecConfig};
use crate::error::{Error, Result};
use crate::types::{LogLevel, Record};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

// ============================================================================
// Connector Spec (for UI)
// ============================================================================

/// Connector specification returned by spec()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Connector name
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Documentation link
    pub documentation_url: Option<String>,

    /// Configuration specification
    pub spec: SpecConfig,
}

impl ConnectorSpec {
    /// Render as a `SPEC` protocol message
    pub fn to_json(&self) -> Value {
        json!({
            "type": "SPEC",
            "spec": {
                "documentationUrl": self.documentation_url,
                "connectionSpecification": self.spec.to_json_schema(&self.title),
            }
        })
    }
}

// ============================================================================
// Check Result
// ============================================================================

/// Why a connection check failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckFailure {
    /// The API could not be reached (DNS, connect, timeout)
    Network {
        /// Error message
        message: String,
    },
    /// The API rejected the request (4xx), usually a bad API key
    Auth {
        /// Response status code
        status: u16,
        /// Error message
        message: String,
    },
    /// The API failed to serve the request (5xx)
    Server {
        /// Response status code
        status: u16,
        /// Error message
        message: String,
    },
    /// Anything else
    Other {
        /// Error message
        message: String,
    },
}

impl CheckFailure {
    /// Classify an error raised during a connection check
    pub fn from_error(err: &Error) -> Self {
        let message = err.to_string();
        match err.status() {
            Some(status @ 400..=499) => Self::Auth { status, message },
            Some(status @ 500..=599) => Self::Server { status, message },
            _ if err.is_network() => Self::Network { message },
            _ => Self::Other { message },
        }
    }

    /// Human-readable failure message
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Auth { message, .. }
            | Self::Server { message, .. }
            | Self::Other { message } => message,
        }
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a connection check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Failure details if the check failed
    pub error: Option<CheckFailure>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Create a failed check result
    pub fn failure(error: CheckFailure) -> Self {
        Self {
            success: false,
            error: Some(error),
        }
    }

    /// Create a failed check result from an error
    pub fn from_error(err: &Error) -> Self {
        Self::failure(CheckFailure::from_error(err))
    }

    /// Render as a `CONNECTION_STATUS` protocol message
    pub fn to_json(&self) -> Value {
        match &self.error {
            None => json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": { "status": "SUCCEEDED" }
            }),
            Some(failure) => json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {
                    "status": "FAILED",
                    "message": format!("Connection failed: {failure}")
                }
            }),
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Lifecycle status of one stream during a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    /// The first page is about to be requested
    Started,
    /// Every page was read
    Complete {
        /// Records emitted
        records: u64,
        /// Pages requested
        pages: u32,
    },
    /// The stream stopped on an error
    Incomplete,
}

impl StreamStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::Complete { .. } => "COMPLETE",
            Self::Incomplete => "INCOMPLETE",
        }
    }
}

/// Messages emitted during read operations
#[derive(Debug, Clone)]
pub enum Message {
    /// One extracted record
    Record {
        /// Stream name
        stream: String,
        /// Record data exactly as returned by the API
        data: Record,
        /// Timestamp when the record was emitted
        emitted_at: DateTime<Utc>,
    },

    /// Stream lifecycle change
    StreamStatus {
        /// Stream name
        stream: String,
        /// New status
        status: StreamStatus,
    },

    /// Log message
    Log {
        /// Log level
        level: LogLevel,
        /// Log message
        message: String,
    },
}

impl Message {
    /// Create a record message
    pub fn record(stream: impl Into<String>, data: Record) -> Self {
        Self::Record {
            stream: stream.into(),
            data,
            emitted_at: Utc::now(),
        }
    }

    /// Create a stream status message
    pub fn stream_status(stream: impl Into<String>, status: StreamStatus) -> Self {
        Self::StreamStatus {
            stream: stream.into(),
            status,
        }
    }

    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
        }
    }

    /// Create an info log message
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a debug log message
    pub fn debug(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Debug, message)
    }

    /// Create a warning log message
    pub fn warn(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Warn, message)
    }

    /// Create an error log message
    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a stream status message
    pub fn is_stream_status(&self) -> bool {
        matches!(self, Self::StreamStatus { .. })
    }

    /// Check if this is a log message
    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log { .. })
    }

    /// Render as a protocol message
    pub fn to_json(&self) -> Value {
        match self {
            Self::Record {
                stream,
                data,
                emitted_at,
            } => json!({
                "type": "RECORD",
                "record": {
                    "stream": stream,
                    "data": data,
                    "emitted_at": emitted_at.timestamp_millis()
                }
            }),
            Self::StreamStatus { stream, status } => json!({
                "type": "TRACE",
                "trace": {
                    "type": "STREAM_STATUS",
                    "emitted_at": Utc::now().timestamp_millis(),
                    "stream_status": {
                        "stream_descriptor": { "name": stream },
                        "status": status.as_str()
                    }
                }
            }),
            Self::Log { level, message } => json!({
                "type": "LOG",
                "log": { "level": level, "message": message }
            }),
        }
    }
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Type alias for the message stream returned by read()
///
/// A stream that fails yields its error as an `Err` item; items for later
/// streams may still follow.
pub type MessageStream = BoxStream<'static, Result<Message>>;

/// Core trait that a source connector implements
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the connector specification (for UI/validation)
    fn spec(&self) -> ConnectorSpec;

    /// Tests if credentials and configuration are valid
    ///
    /// Only configuration errors are returned as `Err`; connectivity
    /// problems are reported inside the `CheckResult`.
    async fn check(&self, config: &Value) -> Result<CheckResult>;

    /// Lists available streams from the source
    async fn discover(&self, config: &Value) -> Result<Catalog>;

    /// Reads data from selected streams
    async fn read(&self, config: &Value, catalog: &ConfiguredCatalog) -> Result<MessageStream>;
}
