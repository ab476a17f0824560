//! Statistics of one crawl run
//!
//! This module tracks what the scheduler did and renders it for the
//! terminal once the run is over.

use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// When the scheduler was created
    pub started_at: DateTime<Utc>,

    /// When the run reached its terminal state
    pub finished_at: Option<DateTime<Utc>>,

    /// Distinct URLs dequeued for processing
    pub pages_visited: usize,

    /// Units of work that fetched and parsed their page
    pub pages_fetched: usize,

    /// Units of work that failed (fetch error or panic)
    pub pages_failed: usize,

    /// Records added to the sink
    pub records_extracted: usize,

    /// Discovered links accepted into the frontier
    pub links_enqueued: usize,

    /// New links found by units that completed while draining
    pub links_discarded: usize,

    /// Stale frontier entries skipped because they were already visited
    pub duplicates_skipped: usize,
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStats {
    /// Creates statistics for a run starting now
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_visited: 0,
            pages_fetched: 0,
            pages_failed: 0,
            records_extracted: 0,
            links_enqueued: 0,
            links_discarded: 0,
            duplicates_skipped: 0,
        }
    }

    /// Marks the run finished and records the frontier's final counters
    pub fn finish(&mut self, pages_visited: usize, duplicates_skipped: usize) {
        self.finished_at = Some(Utc::now());
        self.pages_visited = pages_visited;
        self.duplicates_skipped = duplicates_skipped;
    }

    /// Run duration in whole seconds, once finished
    pub fn duration_seconds(&self) -> Option<u64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds().max(0) as u64)
    }

    /// Completed units per second since the run started
    pub fn pages_per_second(&self) -> f64 {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        let elapsed = (end - self.started_at).num_milliseconds() as f64 / 1000.0;
        if elapsed <= 0.0 {
            return 0.0;
        }
        (self.pages_fetched + self.pages_failed) as f64 / elapsed
    }

    /// Share of completed units that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        let completed = self.pages_fetched + self.pages_failed;
        if completed == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / completed as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = stats.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Pages:");
    println!("  Visited: {}", stats.pages_visited);
    println!("  Fetched: {}", stats.pages_fetched);
    println!("  Failed: {}", stats.pages_failed);
    println!();

    println!("Links:");
    println!("  Enqueued: {}", stats.links_enqueued);
    println!("  Discarded while draining: {}", stats.links_discarded);
    println!("  Duplicate entries skipped: {}", stats.duplicates_skipped);
    println!();

    println!("Records extracted: {}", stats.records_extracted);
    println!(
        "Success Rate: {:.1}% ({} / {} pages fetched)",
        stats.success_rate(),
        stats.pages_fetched,
        stats.pages_fetched + stats.pages_failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_stats_are_zeroed() {
        let stats = CrawlStats::new();
        assert_eq!(stats.pages_visited, 0);
        assert_eq!(stats.records_extracted, 0);
        assert!(stats.finished_at.is_none());
        assert!(stats.duration_seconds().is_none());
    }

    #[test]
    fn test_success_rate() {
        let mut stats = CrawlStats::new();
        stats.pages_fetched = 8;
        stats.pages_failed = 2;
        assert!((stats.success_rate() - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_zero_pages() {
        assert_eq!(CrawlStats::new().success_rate(), 0.0);
    }

    #[test]
    fn test_finish_records_duration() {
        let mut stats = CrawlStats::new();
        stats.started_at = Utc::now() - Duration::seconds(5);
        stats.pages_fetched = 10;

        stats.finish(12, 1);

        assert_eq!(stats.pages_visited, 12);
        assert_eq!(stats.duplicates_skipped, 1);
        let seconds = stats.duration_seconds().unwrap();
        assert!((5..=6).contains(&seconds));
        assert!(stats.pages_per_second() > 1.0);
    }
}
