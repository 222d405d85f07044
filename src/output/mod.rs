//! Output module for crawl summaries and reports
//!
//! This module handles:
//! - Tallying target outcomes into a crawl summary
//! - Writing the markdown summary of a run
//! - Reading statistics back from the graph database

mod markdown;
pub mod stats;
mod summary;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{load_statistics, print_statistics, GraphStatistics};
pub use summary::{CrawlSummary, StopReason};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
