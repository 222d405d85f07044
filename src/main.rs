//! Cinegraph main entry point
//!
//! This is the command-line interface for the Cinegraph filmography crawler.

use cinegraph::config::{load_config_with_hash, Config};
use cinegraph::crawler::{run_crawl, PageKind};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Cinegraph: a filmography crawler
///
/// Cinegraph starts from seed pages on an encyclopedia site, reads each
/// person's infobox and filmography, and records which people are credited
/// in which works.
#[derive(Parser, Debug)]
#[command(name = "cinegraph")]
#[command(version)]
#[command(about = "A filmography crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the graph database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cinegraph=info,warn"),
            1 => EnvFilter::new("cinegraph=debug,info"),
            2 => EnvFilter::new("cinegraph=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the parsed configuration and seeds
fn handle_dry_run(config: &Config) {
    println!("=== Cinegraph Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    match config.crawler.max_targets {
        Some(limit) => println!("  Max targets: {}", limit),
        None => println!("  Max targets: unlimited"),
    }
    println!("  Skip visited: {}", config.crawler.skip_visited);
    println!("  Follow works: {}", config.crawler.follow_works);
    println!("  Attribute lookup: {:?}", config.crawler.attribute_lookup);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Summary: {}", config.output.summary_path);

    let people = config
        .seeds
        .iter()
        .filter(|s| s.kind == PageKind::Person)
        .count();
    println!(
        "\nSeeds ({} people, {} works):",
        people,
        config.seeds.len() - people
    );
    for seed in &config.seeds {
        println!("  - [{}] {}", seed.kind, seed.url);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        config.seeds.len()
    );
}

/// Handles the --stats mode: shows statistics from the graph database
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use cinegraph::graph::SqliteGraph;
    use cinegraph::output::{load_statistics, print_statistics};
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let graph = SqliteGraph::new(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&graph)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, config_hash: String) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Crawling {} with {} seed URLs",
        config.crawler.base_url,
        config.seeds.len()
    );

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current target");
            ctrl_c.cancel();
        }
    });

    match run_crawl(config, Some(config_hash), cancel).await {
        Ok(summary) => {
            tracing::info!(
                "Crawl completed: {} people recorded from {} targets",
                summary.people_recorded,
                summary.targets_dequeued
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
