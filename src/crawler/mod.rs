//! Crawler module for page fetching, extraction and scheduling
//!
//! This module contains the core crawling logic, including:
//! - The two-tier frontier and its visited set
//! - HTTP fetching behind the `Fetcher` seam
//! - HTML parsing, link discovery and product extraction
//! - The worker-pool scheduler that drains the frontier

mod extractor;
mod fetcher;
mod frontier;
mod parser;
mod scheduler;

pub use extractor::{Extractor, PageOutcome};
pub use fetcher::{build_http_client, fetch_url, Fetcher, HttpFetcher};
pub use frontier::{Frontier, Tier};
pub use parser::{compile_selector, parse_page, PageSelectors, ParsedPage};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::output::{write_csv, CrawlStats, Record};
use crate::HarvestError;
use std::path::Path;

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Extracted records in completion order
    pub records: Vec<Record>,

    /// Statistics of the run
    pub stats: CrawlStats,
}

/// Runs a crawl with the given fetcher and returns its records
///
/// Nothing is written to disk.
pub async fn run_crawl<F: Fetcher>(fetcher: F, config: &Config) -> Result<CrawlOutcome, HarvestError> {
    let extractor = Extractor::new(fetcher, config)?;
    let mut scheduler = Scheduler::new(extractor, &config.crawler)?;

    let records = scheduler.run().await?;

    Ok(CrawlOutcome {
        records,
        stats: scheduler.stats().clone(),
    })
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier with the base URL
/// 3. Drain the frontier with bounded concurrency
/// 4. Write every extracted record to the configured CSV file
///
/// Per-page failures never fail the run; the CSV is written even when no
/// page could be fetched.
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed and the CSV was written
/// * `Err(HarvestError)` - Setup or writing the CSV failed
///
/// # Example
///
/// ```no_run
/// use paged_harvest::config::Config;
/// use paged_harvest::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = crawl(&Config::default()).await?;
/// println!("{} products", outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlOutcome, HarvestError> {
    let fetcher = HttpFetcher::new(&config.crawler)?;
    let outcome = run_crawl(fetcher, config).await?;

    write_csv(
        Path::new(&config.output.csv_path),
        &outcome.records,
        config.output.layout,
    )?;

    Ok(outcome)
}
