//! Error types for the JazzHR source
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Nothing in this crate retries: every error below is final for the
//! operation that raised it.

use thiserror::Error;

/// The main error type for the JazzHR source
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required config field is absent or null
    #[error("Missing required config field: {field}")]
    MissingConfigField {
        /// Field name
        field: String,
    },

    /// A config field is present but unusable
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue {
        /// Field name
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// JSON (de)serialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Transport-level failure (connect, DNS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("HTTP {status} from '{endpoint}': {body}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Request path without its query string
        endpoint: String,
        /// Response body
        body: String,
    },

    /// No response within the request timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// The base URL does not parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    /// A 2xx body that is not a JSON array of records
    #[error("Malformed response from '{endpoint}': {message}")]
    MalformedResponse {
        /// Request path without its query string
        endpoint: String,
        /// What was wrong with the body
        message: String,
    },

    // ============================================================================
    // Connector Errors
    // ============================================================================
    /// A configured stream name is not one of the known streams
    #[error("Stream '{stream}' not found in catalog")]
    StreamNotFound {
        /// Requested stream name
        stream: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Reading config or writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, endpoint: impl Into<String>, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            endpoint: endpoint.into(),
            body: body.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed_response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a stream-not-found error
    pub fn stream_not_found(stream: impl Into<String>) -> Self {
        Self::StreamNotFound {
            stream: stream.into(),
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error came from the transport rather than the API
    pub fn is_network(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}

/// Result type alias for the JazzHR source
pub type Result<T> = std::result::Result<T, Error>;
