//! Configuration module for Cinegraph
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use cinegraph::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("cinegraph.toml")).unwrap();
//! println!("Crawling {} with {} seeds", config.crawler.base_url, config.seeds.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SeedEntry, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
