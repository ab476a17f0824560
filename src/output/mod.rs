//! Output module for crawl results
//!
//! This module handles:
//! - The product record type and the sink that collects records
//! - Exporting records as CSV
//! - Recording and printing crawl statistics

mod csv_output;
mod record;
pub mod stats;

pub use csv_output::{write_csv, write_records};
pub use record::{Record, RecordSink, NOT_FOUND};
pub use stats::{print_statistics, CrawlStats};
