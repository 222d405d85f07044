//! Cinegraph: a filmography crawler
//!
//! This crate crawls an encyclopedia-style site from seed pages, reads each
//! person page's infobox and filmography table straight off the HTML token
//! stream, and builds a graph connecting people to the works they are
//! credited in.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod scan;
pub mod state;
pub mod tokens;
pub mod url;

use thiserror::Error;

/// Errors that end a whole crawl run
///
/// Per-target failures never reach this type; they are reported as
/// [`state::TargetOutcome`]s.
#[derive(Debug, Error)]
pub enum CinegraphError {
    #[error("Graph error: {0}")]
    Graph(#[from] graph::GraphError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Cinegraph operations
pub type Result<T> = std::result::Result<T, CinegraphError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, PageKind, PersonRecord, Target};
pub use graph::{Graph, GraphSink};
pub use state::AnalysisState;
