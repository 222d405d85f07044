//! Crawl summary types

use crate::crawler::{AnalysisError, FetchError};
use crate::state::TargetOutcome;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Why a crawl loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// The frontier ran dry
    #[default]
    FrontierEmpty,

    /// The configured target limit was reached
    TargetLimit,

    /// The cancellation token fired
    Cancelled,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrontierEmpty => "frontier empty",
            Self::TargetLimit => "target limit reached",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Tallies for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    // Run metadata
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub config_hash: Option<String>,
    pub stop_reason: StopReason,

    // Target counts
    pub targets_dequeued: u64,
    pub people_recorded: u64,
    pub works_credited: u64,
    pub works_unanalyzed: u64,
    pub already_visited: u64,

    // Failure counts
    pub fetch_failures: u64,
    pub fetch_timeouts: u64,
    pub fetch_cancelled: u64,
    pub filmography_missing: u64,
    pub reference_page_failures: u64,
    pub sink_failures: u64,

    /// Targets still queued when the loop stopped
    pub frontier_remaining: u64,

    /// Sample of failed target URLs with their outcome label
    pub failed_targets: BTreeMap<String, &'static str>,
}

/// Failed URLs kept for the report
const MAX_FAILED_TARGETS: usize = 50;

impl CrawlSummary {
    /// Starts an empty summary timestamped now
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            config_hash: None,
            stop_reason: StopReason::default(),
            targets_dequeued: 0,
            people_recorded: 0,
            works_credited: 0,
            works_unanalyzed: 0,
            already_visited: 0,
            fetch_failures: 0,
            fetch_timeouts: 0,
            fetch_cancelled: 0,
            filmography_missing: 0,
            reference_page_failures: 0,
            sink_failures: 0,
            frontier_remaining: 0,
            failed_targets: BTreeMap::new(),
        }
    }

    /// Counts the outcome of one dequeued target
    pub fn record(&mut self, url: &str, outcome: &TargetOutcome) {
        self.targets_dequeued += 1;

        match outcome {
            TargetOutcome::Recorded { works } => {
                self.people_recorded += 1;
                self.works_credited += *works as u64;
            }
            TargetOutcome::Unanalyzed => self.works_unanalyzed += 1,
            TargetOutcome::AlreadyVisited => self.already_visited += 1,
            TargetOutcome::FetchFailed(FetchError::Timeout { .. }) => self.fetch_timeouts += 1,
            TargetOutcome::FetchFailed(FetchError::Cancelled { .. }) => self.fetch_cancelled += 1,
            TargetOutcome::FetchFailed(_) => self.fetch_failures += 1,
            TargetOutcome::AnalysisFailed(AnalysisError::FilmographyNotFound { .. }) => {
                self.filmography_missing += 1
            }
            TargetOutcome::AnalysisFailed(AnalysisError::ReferencePage { .. }) => {
                self.reference_page_failures += 1
            }
            TargetOutcome::SinkFailed(_) => self.sink_failures += 1,
        }

        if outcome.is_failure() && self.failed_targets.len() < MAX_FAILED_TARGETS {
            self.failed_targets.insert(url.to_string(), outcome.label());
        }
    }

    /// Stamps the end of the run
    pub fn finish(&mut self, reason: StopReason, frontier_remaining: usize) {
        self.finished_at = Some(Utc::now());
        self.stop_reason = reason;
        self.frontier_remaining = frontier_remaining as u64;
    }

    pub fn total_failures(&self) -> u64 {
        self.fetch_failures
            + self.fetch_timeouts
            + self.fetch_cancelled
            + self.filmography_missing
            + self.reference_page_failures
            + self.sink_failures
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Share of dequeued targets that produced a person record
    pub fn success_rate(&self) -> f64 {
        if self.targets_dequeued == 0 {
            return 0.0;
        }
        (self.people_recorded as f64 / self.targets_dequeued as f64) * 100.0
    }
}

impl Default for CrawlSummary {
    fn default() -> Self {
        Self::new()
    }
}
