use crate::crawler::{AnalysisError, FetchError};
use crate::graph::GraphError;
use std::fmt;

/// Result of processing one dequeued target
///
/// Every variant is local to its target; none of them stops the crawl.
#[derive(Debug)]
pub enum TargetOutcome {
    /// A person record was handed to the graph sink
    Recorded {
        /// Number of work URLs in the record
        works: usize,
    },

    /// A work page; there is no work analysis yet
    Unanalyzed,

    /// The normalized URL was already processed in this run
    AlreadyVisited,

    /// The page itself could not be fetched
    FetchFailed(FetchError),

    /// The page was fetched but could not be turned into a record
    AnalysisFailed(AnalysisError),

    /// The record was built but the graph sink rejected it
    SinkFailed(GraphError),
}

impl TargetOutcome {
    /// Returns true if a record reached the graph
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Recorded { .. })
    }

    /// Returns true if the target failed for any reason
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed(_) | Self::AnalysisFailed(_) | Self::SinkFailed(_)
        )
    }

    /// Short label used in logs and summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recorded { .. } => "recorded",
            Self::Unanalyzed => "unanalyzed",
            Self::AlreadyVisited => "already_visited",
            Self::FetchFailed(FetchError::Timeout { .. }) => "fetch_timeout",
            Self::FetchFailed(FetchError::Cancelled { .. }) => "fetch_cancelled",
            Self::FetchFailed(_) => "fetch_failed",
            Self::AnalysisFailed(AnalysisError::FilmographyNotFound { .. }) => {
                "filmography_missing"
            }
            Self::AnalysisFailed(AnalysisError::ReferencePage { .. }) => "reference_page_failed",
            Self::SinkFailed(_) => "sink_failed",
        }
    }
}

impl fmt::Display for TargetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recorded { works } => write!(f, "recorded with {} works", works),
            Self::Unanalyzed => write!(f, "work page not analyzed"),
            Self::AlreadyVisited => write!(f, "already visited"),
            Self::FetchFailed(e) => write!(f, "fetch failed: {}", e),
            Self::AnalysisFailed(e) => write!(f, "analysis failed: {}", e),
            Self::SinkFailed(e) => write!(f, "graph sink failed: {}", e),
        }
    }
}
