//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ConfiguredCatalog, JazzHrConfig};
use crate::connector::{Connector, Message};
use crate::engine::{SyncConfig, SyncStats};
use crate::error::{Error, Result};
use crate::source::JazzHrSource;
use crate::streams::STREAM_DESCRIPTORS;
use futures::StreamExt;
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use std::time::Instant;
use tracing::{error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing protocol messages to stdout
    pub async fn run(&self) -> Result<()> {
        let mut out = std::io::stdout();
        self.run_with_writer(&mut out).await
    }

    /// Run the CLI command, writing protocol messages to `out`
    pub async fn run_with_writer<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(out),
            Commands::Check { config_json } => self.check(out, config_json.as_deref()).await,
            Commands::Discover { config_json } => {
                self.discover(out, config_json.as_deref()).await
            }
            Commands::Streams => self.streams(out),
            Commands::Read {
                streams,
                config_json,
                fail_fast,
            } => {
                let mut sync_config = SyncConfig::new().with_fail_fast(*fail_fast);
                if let Some(streams) = streams {
                    sync_config = sync_config.with_streams(
                        streams
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty()),
                    );
                }
                self.read(out, config_json.as_deref(), &sync_config).await
            }
        }
    }

    /// Build the source, honouring `--base-url`
    fn source(&self) -> Result<JazzHrSource> {
        match &self.cli.base_url {
            Some(base_url) => JazzHrSource::with_base_url(base_url.as_str()),
            None => JazzHrSource::new(),
        }
    }

    /// Load configuration
    fn load_config(&self, inline: Option<&str>) -> Result<Value> {
        // Inline config takes precedence
        if let Some(json_str) = inline {
            return serde_json::from_str(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        if let Some(path) = &self.cli.config {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
            return serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        Err(Error::config(
            "No configuration given (use --config or --config-json)",
        ))
    }

    /// Show spec
    fn spec<W: Write>(&self, out: &mut W) -> Result<()> {
        let spec = self.source()?.spec();
        self.output_message(out, &spec.to_json())
    }

    /// Check connection
    async fn check<W: Write>(&self, out: &mut W, config_json: Option<&str>) -> Result<()> {
        let config = self.load_config(config_json)?;
        let source = self.source()?;

        self.output_message(out, &Message::info("Checking connection to JazzHR").to_json())?;

        let result = source.check(&config).await?;
        self.output_message(out, &result.to_json())
    }

    /// Discover streams
    async fn discover<W: Write>(
        &self,
        out: &mut W,
        config_json: Option<&str>,
    ) -> Result<()> {
        let config = self.load_config(config_json)?;
        let catalog = self.source()?.discover(&config).await?;

        self.output_message(
            out,
            &json!({
                "type": "CATALOG",
                "catalog": catalog
            }),
        )
    }

    /// List stream names
    fn streams<W: Write>(&self, out: &mut W) -> Result<()> {
        let names: Vec<&str> = STREAM_DESCRIPTORS.iter().map(|d| d.name).collect();

        self.output_message(
            out,
            &json!({
                "type": "STREAMS",
                "streams": names,
                "connector": crate::NAME
            }),
        )
    }

    /// Read streams
    ///
    /// Every selected stream is attempted unless `fail_fast` is set. Fails
    /// after the read if any stream failed.
    async fn read<W: Write>(
        &self,
        out: &mut W,
        config_json: Option<&str>,
        sync_config: &SyncConfig,
    ) -> Result<()> {
        let sync_start = Instant::now();
        let config = self.load_config(config_json)?;
        let source = self.source()?;

        let catalog = source.catalog(&JazzHrConfig::from_value(&config)?);
        let configured = if sync_config.streams.is_empty() {
            ConfiguredCatalog::from_catalog(&catalog)
        } else {
            let names: Vec<&str> = sync_config.streams.iter().map(String::as_str).collect();
            ConfiguredCatalog::select(&catalog, &names)?
        };

        let mut messages = source.read(&config, &configured).await?;
        let mut stats = SyncStats::new();
        let mut stopping = false;

        // A failed stream's error is followed by its INCOMPLETE status;
        // fail-fast stops only once that status is written.
        while let Some(item) = messages.next().await {
            match item {
                Ok(message) => {
                    stats.observe(&message);
                    self.output_message(out, &message.to_json())?;
                    if stopping && message.is_stream_status() {
                        break;
                    }
                }
                Err(e) => {
                    stats.add_error();
                    error!("Stream failed: {e}");
                    self.output_message(
                        out,
                        &Message::error(format!("Stream failed: {e}")).to_json(),
                    )?;
                    stopping = sync_config.fail_fast;
                }
            }
        }

        stats.set_duration(sync_start.elapsed().as_millis() as u64);
        info!(
            records = stats.records_synced,
            pages = stats.pages_fetched,
            streams_synced = stats.streams_synced,
            streams_failed = stats.streams_failed,
            errors = stats.errors,
            duration_ms = stats.duration_ms,
            "Read finished"
        );

        if stats.has_failures() {
            return Err(Error::Other(format!(
                "Read finished with {} failed stream(s)",
                stats.errors
            )));
        }

        Ok(())
    }

    /// Write one protocol message
    fn output_message<W: Write>(&self, out: &mut W, msg: &Value) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        writeln!(out, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner(args: &[&str]) -> Runner {
        let mut argv = vec!["source-jazzhr"];
        argv.extend_from_slice(args);
        Runner::new(Cli::parse_from(argv))
    }

    fn lines(buf: &[u8]) -> Vec<Value> {
        String::from_utf8_lossy(buf)
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_spec_command() {
        let mut buf = Vec::new();
        runner(&["spec"]).run_with_writer(&mut buf).await.unwrap();

        let out = lines(&buf);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["type"], "SPEC");
    }

    #[tokio::test]
    async fn test_streams_command() {
        let mut buf = Vec::new();
        runner(&["streams"]).run_with_writer(&mut buf).await.unwrap();

        let out = lines(&buf);
        assert_eq!(out[0]["type"], "STREAMS");
        assert_eq!(out[0]["streams"].as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_check_requires_config() {
        let mut buf = Vec::new();
        let err = runner(&["check"]).run_with_writer(&mut buf).await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_check_command_reports_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let uri = server.uri();
        let mut buf = Vec::new();
        runner(&[
            "check",
            "--base-url",
            uri.as_str(),
            "--config-json",
            r#"{"api_key":"bad"}"#,
        ])
        .run_with_writer(&mut buf)
        .await
        .unwrap();

        let out = lines(&buf);
        assert_eq!(out[0]["type"], "LOG");
        assert_eq!(out[1]["type"], "CONNECTION_STATUS");
        assert_eq!(out[1]["connectionStatus"]["status"], "FAILED");
    }

    #[tokio::test]
    async fn test_read_command_selected_stream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/page/1/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": "u1"}, {"id": "u2"}])),
            )
            .mount(&server)
            .await;

        let uri = server.uri();
        let mut buf = Vec::new();
        runner(&[
            "read",
            "--base-url",
            uri.as_str(),
            "--config-json",
            r#"{"api_key":"k"}"#,
            "--streams",
            "users",
        ])
        .run_with_writer(&mut buf)
        .await
        .unwrap();

        let records: Vec<Value> = lines(&buf)
            .into_iter()
            .filter(|m| m["type"] == "RECORD")
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["record"]["data"]["id"], "u2");
    }

    #[tokio::test]
    async fn test_read_command_fails_when_a_stream_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs/page/1/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/page/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "u1"}])))
            .expect(1)
            .mount(&server)
            .await;

        let uri = server.uri();
        let mut buf = Vec::new();
        let result = runner(&[
            "read",
            "--base-url",
            uri.as_str(),
            "--config-json",
            r#"{"api_key":"k"}"#,
            "--streams",
            "jobs,users",
        ])
        .run_with_writer(&mut buf)
        .await;

        assert!(result.is_err());
        let out = lines(&buf);
        assert!(out.iter().any(|m| m["type"] == "RECORD"));
        assert!(out
            .iter()
            .any(|m| m["type"] == "LOG" && m["log"]["level"] == "ERROR"));
    }

    #[tokio::test]
    async fn test_read_command_fail_fast_skips_remaining_streams() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs/page/1/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/page/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let uri = server.uri();
        let mut buf = Vec::new();
        let result = runner(&[
            "read",
            "--base-url",
            uri.as_str(),
            "--config-json",
            r#"{"api_key":"k"}"#,
            "--streams",
            "jobs,users",
            "--fail-fast",
        ])
        .run_with_writer(&mut buf)
        .await;

        assert!(result.is_err());

        let statuses: Vec<(String, String)> = lines(&buf)
            .into_iter()
            .filter(|m| m["type"] == "TRACE")
            .map(|m| {
                let status = &m["trace"]["stream_status"];
                (
                    status["stream_descriptor"]["name"].as_str().unwrap().to_string(),
                    status["status"].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("jobs".to_string(), "STARTED".to_string()),
                ("jobs".to_string(), "INCOMPLETE".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_command_unknown_stream() {
        let mut buf = Vec::new();
        let err = runner(&[
            "read",
            "--config-json",
            r#"{"api_key":"k"}"#,
            "--streams",
            "candidates",
        ])
        .run_with_writer(&mut buf)
        .await
        .unwrap_err();

        assert!(matches!(err, Error::StreamNotFound { .. }));
        assert!(buf.is_empty());
    }
}
