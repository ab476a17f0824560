//! Paged-Harvest main entry point
//!
//! This is the command-line interface for the Paged-Harvest product crawler.

use anyhow::Context;
use clap::Parser;
use paged_harvest::config::{load_config_with_hash, validate, Config};
use paged_harvest::crawler::crawl;
use paged_harvest::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Paged-Harvest: a bounded, priority-aware product crawler
///
/// Paged-Harvest crawls one site subtree, visiting paginated listings before
/// other pages, and writes the products it finds on those listings to CSV.
#[derive(Parser, Debug)]
#[command(name = "paged-harvest")]
#[command(version)]
#[command(about = "A bounded, priority-aware product crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Seed URL and crawl scope prefix
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Maximum number of pages to visit
    #[arg(long, value_name = "N")]
    max_crawl_length: Option<usize>,

    /// Maximum number of concurrent fetches
    #[arg(long, value_name = "N")]
    max_concurrency: Option<usize>,

    /// Output CSV path
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.crawler.base_url = base_url.clone();
        }
        if let Some(max) = self.max_crawl_length {
            config.crawler.max_crawl_length = max;
        }
        if let Some(max) = self.max_concurrency {
            config.crawler.max_concurrency = max;
        }
        if let Some(output) = &self.output {
            config.output.csv_path = output.clone();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the completion report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("paged_harvest=info,warn"),
            1 => EnvFilter::new("paged_harvest=debug,info"),
            2 => EnvFilter::new("paged_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Paged-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Max crawl length: {}", config.crawler.max_crawl_length);
    println!("  Max concurrency: {}", config.crawler.max_concurrency);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    if let Some(agent) = &config.crawler.user_agent {
        println!("  User agent: {}", agent);
    }

    println!("\nExtraction:");
    println!("  Pagination pattern: {}", config.extraction.pagination_pattern);
    println!("  Product selector: {}", config.extraction.product_selector);
    println!("  Link selector: {}", config.extraction.link_selector);
    println!("  Image selector: {}", config.extraction.image_selector);
    println!("  Name selector: {}", config.extraction.name_selector);
    println!("  Price selector: {}", config.extraction.price_selector);

    println!("\nOutput:");
    println!("  CSV: {} ({:?})", config.output.csv_path, config.output.layout);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, quiet: bool) -> anyhow::Result<()> {
    tracing::info!("Crawling {}", config.crawler.base_url);

    let outcome = crawl(config).await.context("Crawl failed")?;

    if !quiet {
        print_statistics(&outcome.stats);
        println!();
    }
    println!(
        "✓ CSV file {} has been successfully created ({} records)",
        config.output.csv_path,
        outcome.records.len()
    );

    Ok(())
}
