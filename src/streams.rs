//! JazzHR stream definitions
//!
//! Every JazzHR stream is the same full-refresh, page-numbered GET against a
//! different endpoint, so a stream is a `StreamDescriptor` value plus the
//! shared configuration. Adding a stream means adding one row to
//! [`STREAM_DESCRIPTORS`].

use crate::config::{CatalogStream, JazzHrConfig};
use crate::pagination::PageState;
use crate::types::SyncMode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Static identity of one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDescriptor {
    /// Stream name as exposed in the catalog
    pub name: &'static str,
    /// API endpoint segment under the base URL
    pub endpoint: &'static str,
    /// Field that uniquely identifies a record
    pub primary_key: &'static str,
}

impl StreamDescriptor {
    /// Descriptor keyed on `id`, the primary key of every JazzHR resource
    pub const fn new(name: &'static str, endpoint: &'static str) -> Self {
        Self {
            name,
            endpoint,
            primary_key: "id",
        }
    }

    /// Look up a descriptor by stream name
    pub fn find(name: &str) -> Option<&'static StreamDescriptor> {
        STREAM_DESCRIPTORS.iter().find(|d| d.name == name)
    }
}

/// All JazzHR streams, in catalog order
pub const STREAM_DESCRIPTORS: [StreamDescriptor; 11] = [
    StreamDescriptor::new("activities", "activities"),
    StreamDescriptor::new("applicants", "applicants"),
    StreamDescriptor::new("applicants_to_jobs", "applicants2jobs"),
    StreamDescriptor::new("categories_to_applicants", "categories2applicants"),
    StreamDescriptor::new("categories", "categories"),
    StreamDescriptor::new("contacts", "contacts"),
    StreamDescriptor::new("hires", "hires"),
    StreamDescriptor::new("jobs", "jobs"),
    StreamDescriptor::new("questionnaire_answers", "questionnaire_answers"),
    StreamDescriptor::new("tasks", "tasks"),
    StreamDescriptor::new("users", "users"),
];

/// A runnable stream: descriptor plus shared, read-only configuration
#[derive(Debug, Clone)]
pub struct JazzHrStream {
    descriptor: StreamDescriptor,
    config: Arc<JazzHrConfig>,
}

impl JazzHrStream {
    /// Bind a descriptor to a configuration
    pub fn new(descriptor: StreamDescriptor, config: Arc<JazzHrConfig>) -> Self {
        Self { descriptor, config }
    }

    /// The static descriptor
    pub fn descriptor(&self) -> StreamDescriptor {
        self.descriptor
    }

    /// Stream name
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// API endpoint segment
    pub fn endpoint(&self) -> &'static str {
        self.descriptor.endpoint
    }

    /// Primary key field
    pub fn primary_key(&self) -> &'static str {
        self.descriptor.primary_key
    }

    /// Pagination state for the first page
    pub fn initial_state(&self) -> PageState {
        PageState::first(self.descriptor.endpoint)
    }

    /// Request path for a page, relative to the API base URL
    ///
    /// The key is percent-encoded as a query component; keys made of
    /// unreserved characters come out unchanged.
    pub fn path(&self, page: u32) -> String {
        format!(
            "{}/page/{page}/?apikey={}",
            self.descriptor.endpoint,
            encode_query_value(&self.config.api_key)
        )
    }

    /// Headers sent with every page request
    pub fn request_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("OAuth {}", self.config.api_key),
        );
        headers
    }

    /// Record schema: records are passed through, so any object is accepted
    pub fn json_schema(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                (self.descriptor.primary_key): { "type": ["null", "string", "integer"] }
            },
            "additionalProperties": true
        })
    }

    /// Catalog entry for discovery
    pub fn catalog_entry(&self) -> CatalogStream {
        CatalogStream {
            name: self.descriptor.name.to_string(),
            json_schema: self.json_schema(),
            supported_sync_modes: vec![SyncMode::FullRefresh],
            source_defined_primary_key: Some(vec![vec![self
                .descriptor
                .primary_key
                .to_string()]]),
        }
    }
}

fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
