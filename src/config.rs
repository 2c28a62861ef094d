//! Configuration types for the JazzHR source
//!
//! The user-facing connector configuration, the configuration
//! specification advertised by `spec`, and the catalog types exchanged
//! with the harness.

use crate::error::{Error, Result};
use crate::types::{OptionStringExt, SyncMode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Connector Config
// ============================================================================

/// User-supplied configuration for the JazzHR source
#[derive(Clone, Serialize, Deserialize)]
pub struct JazzHrConfig {
    /// JazzHR API key, sent both as `apikey` query parameter and in the
    /// `Authorization: OAuth` header
    pub api_key: String,
}

impl JazzHrConfig {
    /// Create a config from an API key, rejecting empty keys
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key
            .into()
            .none_if_empty()
            .ok_or_else(|| Error::invalid_value("api_key", "must not be empty"))?;
        Ok(Self { api_key })
    }

    /// Parse and validate a config from raw JSON
    ///
    /// Unknown fields are ignored.
    pub fn from_value(value: &Value) -> Result<Self> {
        let api_key = match value.get("api_key") {
            None | Some(Value::Null) => return Err(Error::missing_field("api_key")),
            Some(Value::String(key)) => key.clone(),
            Some(other) => {
                return Err(Error::invalid_value(
                    "api_key",
                    format!("expected a string, got {other}"),
                ))
            }
        };
        Self::new(api_key)
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(&value)
    }
}

impl fmt::Debug for JazzHrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JazzHrConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Spec Config (for UI)
// ============================================================================

/// Configuration specification for connector setup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecConfig {
    /// Configuration properties
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyConfig>,
}

impl SpecConfig {
    /// Render as a JSON schema (`connectionSpecification`)
    pub fn to_json_schema(&self, title: &str) -> Value {
        let required: Vec<&str> = self
            .properties
            .iter()
            .filter(|(_, p)| p.required)
            .map(|(name, _)| name.as_str())
            .collect();

        let properties: serde_json::Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, p)| {
                let mut schema = json!({ "type": p.property_type });
                if let Some(title) = &p.title {
                    schema["title"] = json!(title);
                }
                if let Some(description) = &p.description {
                    schema["description"] = json!(description);
                }
                if p.secret {
                    schema["airbyte_secret"] = json!(true);
                }
                (name.clone(), schema)
            })
            .collect();

        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": title,
            "type": "object",
            "required": required,
            "properties": properties,
            "additionalProperties": true
        })
    }
}

/// Configuration property definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyConfig {
    /// JSON schema type name
    #[serde(rename = "type")]
    pub property_type: String,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,

    /// Property description
    #[serde(default)]
    pub description: Option<String>,

    /// Whether this is a secret (should be masked)
    #[serde(default)]
    pub secret: bool,

    /// Whether this property is required
    #[serde(default)]
    pub required: bool,
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Discovered catalog (available streams)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Available streams
    pub streams: Vec<CatalogStream>,
}

/// Stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStream {
    /// Stream name
    pub name: String,

    /// JSON schema for the stream
    #[serde(default)]
    pub json_schema: Value,

    /// Supported sync modes
    #[serde(default)]
    pub supported_sync_modes: Vec<SyncMode>,

    /// Source-defined primary key
    #[serde(default)]
    pub source_defined_primary_key: Option<Vec<Vec<String>>>,
}

/// Configured catalog (selected streams for sync)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    /// Selected streams
    pub streams: Vec<ConfiguredStream>,
}

impl ConfiguredCatalog {
    /// Select every stream of a discovered catalog for full refresh
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            streams: catalog
                .streams
                .iter()
                .cloned()
                .map(ConfiguredStream::full_refresh)
                .collect(),
        }
    }

    /// Select the named streams of a discovered catalog, in the given order
    pub fn select(catalog: &Catalog, names: &[&str]) -> Result<Self> {
        let streams = names
            .iter()
            .map(|name| {
                catalog
                    .streams
                    .iter()
                    .find(|s| s.name == *name)
                    .cloned()
                    .map(ConfiguredStream::full_refresh)
                    .ok_or_else(|| Error::stream_not_found(*name))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { streams })
    }

    /// Names of the selected streams
    pub fn stream_names(&self) -> Vec<&str> {
        self.streams.iter().map(|s| s.stream.name.as_str()).collect()
    }
}

/// Configured stream for sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfiguredStream {
    /// Stream reference
    pub stream: CatalogStream,

    /// Selected sync mode
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// Primary key to use
    #[serde(default)]
    pub primary_key: Option<Vec<Vec<String>>>,
}

impl ConfiguredStream {
    /// Configure a catalog stream for full refresh, keeping its primary key
    pub fn full_refresh(stream: CatalogStream) -> Self {
        let primary_key = stream.source_defined_primary_key.clone();
        Self {
            stream,
            sync_mode: SyncMode::FullRefresh,
            primary_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let stream = |name: &str| CatalogStream {
            name: name.to_string(),
            json_schema: json!({"type": "object"}),
            supported_sync_modes: vec![SyncMode::FullRefresh],
            source_defined_primary_key: Some(vec![vec!["id".to_string()]]),
        };
        Catalog {
            streams: vec![stream("jobs"), stream("users"), stream("tasks")],
        }
    }

    #[test]
    fn test_config_from_value() {
        let config = JazzHrConfig::from_value(&json!({"api_key": "abc123", "extra": 1})).unwrap();
        assert_eq!(config.api_key, "abc123");
    }

    #[test]
    fn test_config_missing_api_key() {
        let err = JazzHrConfig::from_value(&json!({})).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api_key"));

        let err = JazzHrConfig::from_value(&json!({"api_key": null})).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_config_rejects_empty_and_non_string_keys() {
        let err = JazzHrConfig::from_value(&json!({"api_key": ""})).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));

        let err = JazzHrConfig::from_value(&json!({"api_key": 42})).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_config_from_json() {
        let config = JazzHrConfig::from_json(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.api_key, "k");

        let err = JazzHrConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = JazzHrConfig::new("super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_spec_to_json_schema() {
        let mut spec = SpecConfig::default();
        spec.properties.insert(
            "api_key".to_string(),
            PropertyConfig {
                property_type: "string".to_string(),
                title: Some("API Key".to_string()),
                description: None,
                secret: true,
                required: true,
            },
        );

        let schema = spec.to_json_schema("JazzHR Spec");
        assert_eq!(schema["title"], "JazzHR Spec");
        assert_eq!(schema["required"], json!(["api_key"]));
        assert_eq!(schema["properties"]["api_key"]["type"], "string");
        assert_eq!(schema["properties"]["api_key"]["airbyte_secret"], true);
    }

    #[test]
    fn test_configured_catalog_from_catalog() {
        let configured = ConfiguredCatalog::from_catalog(&catalog());
        assert_eq!(configured.stream_names(), vec!["jobs", "users", "tasks"]);
        assert_eq!(configured.streams[0].sync_mode, SyncMode::FullRefresh);
        assert_eq!(
            configured.streams[0].primary_key,
            Some(vec![vec!["id".to_string()]])
        );
    }

    #[test]
    fn test_configured_catalog_select() {
        let configured = ConfiguredCatalog::select(&catalog(), &["tasks", "jobs"]).unwrap();
        assert_eq!(configured.stream_names(), vec!["tasks", "jobs"]);

        let err = ConfiguredCatalog::select(&catalog(), &["nope"]).unwrap_err();
        assert!(matches!(err, Error::StreamNotFound { ref stream } if stream == "nope"));
    }
}
