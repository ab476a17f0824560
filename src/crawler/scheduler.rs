//! Scheduler for draining the crawl frontier with bounded parallelism
//!
//! This module handles:
//! - A fixed pool of worker tasks fed through a work channel
//! - Dequeue-and-mark-visited on the single task that owns the frontier
//! - Feeding discovered links back into the frontier on completion
//! - Enforcing the visit budget and draining in-flight work at the end
//!
//! The scheduler task is the only owner of the frontier and the record sink.
//! Workers never touch either; they receive URLs and send back completions.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::{Extractor, PageOutcome};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::{Frontier, Tier};
use crate::output::{CrawlStats, Record, RecordSink};
use crate::url::CanonicalUrl;
use crate::{FetchError, HarvestError};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// Completions between progress reports
const PROGRESS_INTERVAL: usize = 10;

/// Result of one unit of work, as reported back to the scheduler
#[derive(Debug)]
enum Completion {
    /// The unit ran to the end, successfully or not
    Finished {
        url: CanonicalUrl,
        result: Result<PageOutcome, FetchError>,
    },

    /// The unit panicked or was cancelled before reporting
    Abandoned { url: CanonicalUrl },
}

/// Scheduler drives one crawl run from seed to terminal state
///
/// The run moves through three phases:
/// - **Running**: while the frontier is not exhausted and fewer than
///   `max_crawl_length` URLs have been visited, keep up to `max_concurrency`
///   units in flight, then wait for one to complete
/// - **Draining**: wait for every unit still in flight; their records are
///   kept but their links are discarded
/// - **Terminal**: the record sink is final
pub struct Scheduler<F> {
    extractor: Arc<Extractor<F>>,
    frontier: Frontier,
    sink: RecordSink,
    stats: CrawlStats,
    max_crawl_length: usize,
    max_concurrency: usize,
}

impl<F: Fetcher> Scheduler<F> {
    /// Creates a scheduler whose frontier holds the extractor's seed
    ///
    /// # Arguments
    ///
    /// * `extractor` - The unit of work run for every dequeued URL
    /// * `config` - Visit budget and concurrency ceiling
    ///
    /// # Returns
    ///
    /// * `Ok(Scheduler)` - Ready to run
    /// * `Err(HarvestError)` - The base URL does not normalize
    pub fn new(extractor: Extractor<F>, config: &CrawlerConfig) -> Result<Self, HarvestError> {
        let seed = extractor.seed()?;

        Ok(Self {
            extractor: Arc::new(extractor),
            frontier: Frontier::with_seed(seed),
            sink: RecordSink::new(),
            stats: CrawlStats::new(),
            max_crawl_length: config.max_crawl_length,
            max_concurrency: config.max_concurrency.max(1),
        })
    }

    /// The frontier, including everything visited so far
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Statistics of the run so far
    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Runs the crawl to completion and returns the extracted records
    ///
    /// Records are in completion order, not discovery order. Per-URL fetch
    /// failures are logged and never end the run.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Record>)` - Every record extracted during the run
    /// * `Err(HarvestError)` - The worker pool died
    pub async fn run(&mut self) -> Result<Vec<Record>, HarvestError> {
        tracing::info!(
            "Starting crawl: budget {} pages, {} workers",
            self.max_crawl_length,
            self.max_concurrency
        );

        let (work_tx, work_rx) = mpsc::channel::<CanonicalUrl>(self.max_concurrency);
        let work_rx = Arc::new(Mutex::new(work_rx));
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

        let mut workers = JoinSet::new();
        for id in 0..self.max_concurrency {
            workers.spawn(run_worker(
                id,
                Arc::clone(&self.extractor),
                Arc::clone(&work_rx),
                done_tx.clone(),
            ));
        }
        drop(done_tx);
        drop(work_rx);

        let result = self.drive(&work_tx, &mut done_rx).await;

        // Closing the work channel lets idle workers exit
        drop(work_tx);
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::warn!("Worker task ended abnormally: {}", e);
            }
        }

        result?;

        self.stats.finish(self.frontier.visited_count(), self.frontier.skipped_duplicates());
        tracing::info!(
            "Crawl completed: {} pages visited, {} records in {}s",
            self.stats.pages_visited,
            self.sink.len(),
            self.stats.duration_seconds().unwrap_or(0)
        );

        Ok(self.sink.take())
    }

    /// The Running and Draining phases
    async fn drive(
        &mut self,
        work_tx: &mpsc::Sender<CanonicalUrl>,
        done_rx: &mut mpsc::UnboundedReceiver<Completion>,
    ) -> Result<(), HarvestError> {
        let mut in_flight = 0usize;

        loop {
            while in_flight < self.max_concurrency && self.within_budget() {
                let Some(url) = self.frontier.dequeue_unvisited() else {
                    break;
                };

                tracing::debug!("Dispatching {}", url);
                work_tx
                    .send(url)
                    .await
                    .map_err(|_| HarvestError::Worker("all workers have exited".to_string()))?;
                in_flight += 1;
            }

            if in_flight == 0 {
                break;
            }

            let completion = next_completion(done_rx).await?;
            in_flight -= 1;
            self.complete(completion, true);

            if self.frontier.is_exhausted() || !self.within_budget() {
                break;
            }
        }

        if in_flight > 0 {
            tracing::debug!("Draining {} in-flight units", in_flight);
        }
        while in_flight > 0 {
            let completion = next_completion(done_rx).await?;
            in_flight -= 1;
            self.complete(completion, false);
        }

        Ok(())
    }

    fn within_budget(&self) -> bool {
        self.frontier.visited_count() < self.max_crawl_length
    }

    /// Folds one completion into the frontier, the sink and the statistics
    fn complete(&mut self, completion: Completion, accept_links: bool) {
        match completion {
            Completion::Finished {
                url,
                result: Ok(outcome),
            } => {
                self.stats.pages_fetched += 1;

                let PageOutcome { links, records } = outcome;
                if accept_links {
                    let pattern = self.extractor.pattern();
                    for link in links {
                        let tier = Tier::classify(&link, pattern);
                        if self.frontier.offer(link, tier) {
                            self.stats.links_enqueued += 1;
                        }
                    }
                } else {
                    self.stats.links_discarded += links
                        .iter()
                        .filter(|link| !self.frontier.is_known(link))
                        .count();
                }

                if !records.is_empty() {
                    tracing::debug!("Extracted {} records from {}", records.len(), url);
                }
                self.stats.records_extracted += records.len();
                self.sink.extend(records);
            }

            Completion::Finished { result: Err(e), .. } => {
                // The error message already names the URL
                tracing::error!("Error fetching {}", e);
                self.stats.pages_failed += 1;
            }

            Completion::Abandoned { url } => {
                tracing::error!("Unit of work for {} panicked", url);
                self.stats.pages_failed += 1;
            }
        }

        let completed = self.stats.pages_fetched + self.stats.pages_failed;
        if completed % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                "Progress: {} pages completed, {} visited, {} in frontier, {:.2} pages/sec",
                completed,
                self.frontier.visited_count(),
                self.frontier.pending(),
                self.stats.pages_per_second()
            );
        }
    }
}

async fn next_completion(
    done_rx: &mut mpsc::UnboundedReceiver<Completion>,
) -> Result<Completion, HarvestError> {
    done_rx
        .recv()
        .await
        .ok_or_else(|| HarvestError::Worker("all workers have exited".to_string()))
}

/// Pulls URLs off the shared work channel until it closes
///
/// Each unit runs in its own task so that a panic inside the extractor is
/// reported as an abandoned unit instead of taking the worker down with it.
async fn run_worker<F: Fetcher>(
    id: usize,
    extractor: Arc<Extractor<F>>,
    work: Arc<Mutex<mpsc::Receiver<CanonicalUrl>>>,
    done: mpsc::UnboundedSender<Completion>,
) {
    loop {
        let next = work.lock().await.recv().await;
        let Some(url) = next else {
            break;
        };

        tracing::trace!("Worker {} processing {}", id, url);
        let unit = {
            let extractor = Arc::clone(&extractor);
            let url = url.clone();
            tokio::spawn(async move { extractor.process(&url).await })
        };

        let completion = match unit.await {
            Ok(result) => Completion::Finished { url, result },
            Err(e) => {
                tracing::debug!("Unit for {} did not finish: {}", url, e);
                Completion::Abandoned { url }
            }
        };

        if done.send(completion).is_err() {
            break;
        }
    }

    tracing::trace!("Worker {} exiting", id);
}
