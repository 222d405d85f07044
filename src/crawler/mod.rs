//! Crawler module for fetching and analyzing pages
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching bounded by a timeout and a cancellation token
//! - The FIFO crawl frontier
//! - Person page analysis
//! - Overall crawl coordination

mod analyzer;
mod coordinator;
mod fetcher;
mod frontier;

pub use analyzer::{AnalysisError, PageAnalyzer, PersonRecord, WorkOutcome};
pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use frontier::{Frontier, PageKind, Target};
