use crate::crawler::PageKind;
use crate::scan::AttributePolicy;
use crate::url::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Cinegraph
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "seed")]
    pub seeds: Vec<SeedEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Site root that relative links are joined onto (no trailing slash)
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on a single page fetch, in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Stop after this many targets have been dequeued
    #[serde(rename = "max-targets", default)]
    pub max_targets: Option<u32>,

    /// Skip targets whose normalized URL was already processed
    #[serde(rename = "skip-visited", default)]
    pub skip_visited: bool,

    /// Enqueue the works found on person pages as work targets
    #[serde(rename = "follow-works", default = "default_follow_works")]
    pub follow_works: bool,

    /// How scanners locate `class` and `href` attributes
    #[serde(rename = "attribute-lookup", default)]
    pub attribute_lookup: AttributePolicy,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            max_targets: None,
            skip_visited: false,
            follow_works: default_follow_works(),
            attribute_lookup: AttributePolicy::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_follow_works() -> bool {
    true
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite graph database
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the markdown run summary
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

/// A page to start crawling from
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    /// Absolute page URL
    pub url: String,

    /// Whether the page describes a person or a work
    pub kind: PageKind,
}
