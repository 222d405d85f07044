//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop, which:
//! - Dequeues one target at a time from the frontier
//! - Fetches and analyzes person pages
//! - Hands person records to the graph sink
//! - Optionally queues the works it found
//! - Stops on an empty frontier, the target limit or cancellation

use crate::config::{Config, CrawlerConfig, SeedEntry};
use crate::crawler::analyzer::PageAnalyzer;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::{Frontier, PageKind, Target};
use crate::graph::{GraphSink, SqliteGraph};
use crate::output::{generate_markdown_summary, CrawlSummary, StopReason};
use crate::state::TargetOutcome;
use crate::url::{is_same_site, normalize_url};
use std::collections::HashSet;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Drives a crawl over one frontier
///
/// The coordinator owns the frontier and the sink; nothing else mutates
/// them while a crawl runs.
pub struct Coordinator<F, G> {
    config: CrawlerConfig,
    frontier: Frontier,
    fetcher: F,
    sink: G,
    analyzer: PageAnalyzer,
    visited: HashSet<String>,
    cancel: CancellationToken,
}

impl<F: PageFetcher, G: GraphSink> Coordinator<F, G> {
    /// Creates a coordinator with an empty frontier
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - Fetches person pages and filmography pages
    /// * `sink` - Receives every person record
    /// * `cancel` - Stops the loop before the next target once cancelled
    pub fn new(config: CrawlerConfig, fetcher: F, sink: G, cancel: CancellationToken) -> Self {
        let analyzer = PageAnalyzer::new(config.base_url.clone(), config.attribute_lookup);

        Self {
            config,
            frontier: Frontier::new(),
            fetcher,
            sink,
            analyzer,
            visited: HashSet::new(),
            cancel,
        }
    }

    /// Queues a page for crawling
    pub fn add_target(&mut self, url: impl Into<String>, kind: PageKind) {
        self.frontier.enqueue(Target::new(url, kind));
    }

    /// Queues every seed in order
    pub fn seed(&mut self, seeds: &[SeedEntry]) {
        for seed in seeds {
            self.add_target(seed.url.clone(), seed.kind);
        }
        tracing::info!("Seeded frontier with {} targets", seeds.len());
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn sink(&self) -> &G {
        &self.sink
    }

    pub fn into_sink(self) -> G {
        self.sink
    }

    /// Runs the main crawl loop
    ///
    /// No single target's failure ends the loop; it stops only when the
    /// frontier is empty, the target limit is reached or the token is
    /// cancelled.
    pub async fn run(&mut self) -> CrawlSummary {
        let mut summary = CrawlSummary::new();
        let start_time = std::time::Instant::now();

        tracing::info!("Starting crawl with {} queued targets", self.frontier.len());

        let reason = loop {
            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled");
                break StopReason::Cancelled;
            }

            if let Some(limit) = self.config.max_targets {
                if summary.targets_dequeued >= u64::from(limit) {
                    tracing::info!("Reached limit of {} targets", limit);
                    break StopReason::TargetLimit;
                }
            }

            let target = match self.frontier.dequeue() {
                Some(target) => target,
                None => {
                    tracing::info!("Frontier is empty, crawl complete");
                    break StopReason::FrontierEmpty;
                }
            };

            let outcome = self.process_target(&target).await;
            if outcome.is_failure() {
                tracing::warn!("{} {}: {}", target.kind, target.url, outcome);
            } else {
                tracing::debug!("{} {}: {}", target.kind, target.url, outcome);
            }
            summary.record(&target.url, &outcome);

            if summary.targets_dequeued % 10 == 0 {
                let rate = summary.targets_dequeued as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} targets processed, {} in frontier, {:.2} targets/sec",
                    summary.targets_dequeued,
                    self.frontier.len(),
                    rate
                );
            }
        };

        summary.finish(reason, self.frontier.len());

        tracing::info!(
            "Crawl finished ({}): {} targets, {} people recorded, {} failures in {:?}",
            reason.as_str(),
            summary.targets_dequeued,
            summary.people_recorded,
            summary.total_failures(),
            start_time.elapsed()
        );

        summary
    }

    /// Processes a single target
    ///
    /// Every failure is reported in the returned outcome; nothing escapes
    /// this target.
    pub async fn process_target(&mut self, target: &Target) -> TargetOutcome {
        if self.config.skip_visited && !self.visited.insert(visited_key(&target.url)) {
            return TargetOutcome::AlreadyVisited;
        }

        match target.kind {
            PageKind::Work => {
                self.analyzer.analyze_work(&target.url);
                TargetOutcome::Unanalyzed
            }
            PageKind::Person => self.process_person(&target.url).await,
        }
    }

    async fn process_person(&mut self, url: &str) -> TargetOutcome {
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => return TargetOutcome::FetchFailed(e),
        };

        let record = match self
            .analyzer
            .analyze_person(&self.fetcher, url, &body)
            .await
        {
            Ok(record) => record,
            Err(e) => return TargetOutcome::AnalysisFailed(e),
        };

        if let Err(e) = self.sink.add_person(&record) {
            return TargetOutcome::SinkFailed(e);
        }

        tracing::info!(
            "Recorded {} ({}) with {} works",
            record.url,
            if record.name.is_empty() { "unnamed" } else { record.name.as_str() },
            record.work_urls.len()
        );

        if self.config.follow_works {
            for work in &record.work_urls {
                if is_same_site(&self.config.base_url, work) {
                    self.frontier.enqueue(Target::new(work.clone(), PageKind::Work));
                } else {
                    tracing::debug!("Not following off-site work {}", work);
                }
            }
        }

        TargetOutcome::Recorded {
            works: record.work_urls.len(),
        }
    }
}

/// Visited-set key; falls back to the raw URL when it does not normalize
fn visited_key(url: &str) -> String {
    match normalize_url(url) {
        Ok(normalized) => normalized.to_string(),
        Err(_) => url.to_string(),
    }
}

/// Runs the main crawl operation
///
/// 1. Build the HTTP fetcher and open the graph database
/// 2. Seed the frontier from the configuration
/// 3. Run the crawl loop until it stops
/// 4. Write the markdown summary
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `config_hash` - Hash of the configuration file, recorded in the summary
/// * `cancel` - Cancels in-flight fetches and stops the loop
///
/// # Example
///
/// ```no_run
/// use cinegraph::config::load_config_with_hash;
/// use cinegraph::crawler::run_crawl;
/// use std::path::Path;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (config, hash) = load_config_with_hash(Path::new("config.toml"))?;
/// let summary = run_crawl(config, Some(hash), CancellationToken::new()).await?;
/// println!("{} people recorded", summary.people_recorded);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    config_hash: Option<String>,
    cancel: CancellationToken,
) -> crate::Result<CrawlSummary> {
    let fetcher = HttpFetcher::new(
        &config.user_agent,
        config.crawler.request_timeout(),
        cancel.clone(),
    )?;
    let graph = SqliteGraph::new(Path::new(&config.output.database_path))?;

    let mut coordinator = Coordinator::new(config.crawler.clone(), fetcher, graph, cancel);
    coordinator.seed(&config.seeds);

    let mut summary = coordinator.run().await;
    summary.config_hash = config_hash;

    generate_markdown_summary(&summary, Path::new(&config.output.summary_path))?;
    tracing::info!("Summary written to {}", config.output.summary_path);

    Ok(summary)
}
