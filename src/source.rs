//! JazzHR source connector
//!
//! Ties the stream table, the pager and the connection check together
//! behind the `Connector` trait.

use crate::config::{
    Catalog, ConfiguredCatalog, JazzHrConfig, PropertyConfig, SpecConfig,
};
use crate::connector::{CheckResult, Connector, ConnectorSpec, MessageStream};
use crate::engine::{HttpPager, SyncEngine};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::streams::{JazzHrStream, STREAM_DESCRIPTORS};
use crate::types::SyncMode;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Endpoint used by the connection check
const CHECK_ENDPOINT: &str = "categories";

/// The JazzHR source
#[derive(Debug, Clone)]
pub struct JazzHrSource {
    client: HttpClient,
}

impl JazzHrSource {
    /// Create a source against the production API
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(HttpClient::new()?))
    }

    /// Create a source against another base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let config = HttpClientConfig::builder().base_url(base_url).build();
        Ok(Self::with_client(HttpClient::with_config(config)?))
    }

    /// Create a source from a preconfigured HTTP client
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Check that the API accepts the configured key
    ///
    /// Sends `GET categories?apikey=<key>` without the Authorization header.
    /// Failures are classified and returned, never raised.
    pub async fn check_connection(&self, config: &JazzHrConfig) -> CheckResult {
        let request = RequestConfig::new().query("apikey", config.api_key.as_str());

        match self.client.get_with_config(CHECK_ENDPOINT, request).await {
            Ok(_) => {
                info!("Connection check succeeded");
                CheckResult::success()
            }
            Err(e) => {
                warn!("Connection check failed: {e}");
                CheckResult::from_error(&e)
            }
        }
    }

    /// All streams, in catalog order. Performs no I/O.
    pub fn streams(&self, config: &JazzHrConfig) -> Vec<JazzHrStream> {
        let config = Arc::new(config.clone());
        STREAM_DESCRIPTORS
            .iter()
            .map(|descriptor| JazzHrStream::new(*descriptor, Arc::clone(&config)))
            .collect()
    }

    /// The catalog of all streams
    pub fn catalog(&self, config: &JazzHrConfig) -> Catalog {
        Catalog {
            streams: self
                .streams(config)
                .iter()
                .map(JazzHrStream::catalog_entry)
                .collect(),
        }
    }

    /// Streams named in a configured catalog, in catalog order
    ///
    /// Only full refresh is supported; any other sync mode is rejected
    /// before a request is made.
    pub fn selected_streams(
        &self,
        config: &JazzHrConfig,
        catalog: &ConfiguredCatalog,
    ) -> Result<Vec<JazzHrStream>> {
        let available = self.streams(config);
        catalog
            .streams
            .iter()
            .map(|configured| {
                let name = configured.stream.name.as_str();
                let stream = available
                    .iter()
                    .find(|s| s.name() == name)
                    .cloned()
                    .ok_or_else(|| Error::stream_not_found(name))?;
                if configured.sync_mode != SyncMode::FullRefresh {
                    return Err(Error::config(format!(
                        "Stream '{name}' only supports full_refresh, got {:?}",
                        configured.sync_mode
                    )));
                }
                Ok(stream)
            })
            .collect()
    }

    /// Sync engine sharing this source's HTTP client
    pub fn engine(&self) -> SyncEngine {
        SyncEngine::new(HttpPager::new(self.client.clone()))
    }
}

#[async_trait]
impl Connector for JazzHrSource {
    fn spec(&self) -> ConnectorSpec {
        let mut spec = SpecConfig::default();
        spec.properties.insert(
            "api_key".to_string(),
            PropertyConfig {
                property_type: "string".to_string(),
                title: Some("API Key".to_string()),
                description: Some(
                    "JazzHR API key, found under Settings > Integrations in JazzHR".to_string(),
                ),
                secret: true,
                required: true,
            },
        );

        ConnectorSpec {
            name: "source-jazzhr".to_string(),
            title: "JazzHR Spec".to_string(),
            documentation_url: Some("https://www.resumatorapi.com/v1/".to_string()),
            spec,
        }
    }

    async fn check(&self, config: &Value) -> Result<CheckResult> {
        let config = JazzHrConfig::from_value(config)?;
        Ok(self.check_connection(&config).await)
    }

    async fn discover(&self, config: &Value) -> Result<Catalog> {
        let config = JazzHrConfig::from_value(config)?;
        Ok(self.catalog(&config))
    }

    async fn read(&self, config: &Value, catalog: &ConfiguredCatalog) -> Result<MessageStream> {
        let config = JazzHrConfig::from_value(config)?;
        let streams = self.selected_streams(&config, catalog)?;
        info!("Reading streams: {}", catalog.stream_names().join(", "));
        Ok(self.engine().read(streams))
    }
}
