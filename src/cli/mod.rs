//! CLI module
//!
//! Command-line interface for running the connector.
//!
//! # Commands
//!
//! - `spec` - Print the configuration specification
//! - `check` - Test the API key against the API
//! - `discover` - Print the catalog of streams
//! - `streams` - List stream names (no config needed)
//! - `read` - Extract records from streams

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
