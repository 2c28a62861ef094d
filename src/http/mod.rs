//! HTTP client module
//!
//! Provides the single-attempt HTTP client used by the pager and the
//! connection check.
//!
//! # Features
//!
//! - **Base URL joining**: stream paths are relative to the API root
//! - **Status classification**: any non-2xx becomes `Error::HttpStatus`
//! - **Credential hygiene**: query strings are stripped from logged endpoints

mod client;

pub use client::{
    redact_query, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig,
    DEFAULT_BASE_URL,
};
