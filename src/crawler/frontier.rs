//! Two-tier crawl frontier
//!
//! Pending URLs live in a high-priority and a low-priority FIFO. Any pending
//! high-priority URL is handed out before any low-priority one, whatever the
//! arrival order across tiers. Membership in either tier and in the visited
//! set is indexed so that duplicate checks are O(1).

use crate::url::{CanonicalUrl, PaginationPattern};
use std::collections::{HashMap, HashSet, VecDeque};

/// Priority tier of a pending URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Paginated listings
    High,
    /// Every other in-scope link
    Low,
}

impl Tier {
    /// Picks the tier for a newly discovered link
    pub fn classify(url: &CanonicalUrl, pattern: &PaginationPattern) -> Self {
        if pattern.is_match(url) {
            Tier::High
        } else {
            Tier::Low
        }
    }
}

/// Pending URLs plus the set of URLs already handed out for processing
#[derive(Debug, Default)]
pub struct Frontier {
    high: VecDeque<CanonicalUrl>,
    low: VecDeque<CanonicalUrl>,

    /// Number of pending copies of each URL across both tiers
    queued: HashMap<CanonicalUrl, usize>,

    /// URLs already dequeued; never shrinks
    visited: HashSet<CanonicalUrl>,

    /// Pending entries discarded at dequeue time because they were visited
    skipped: usize,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding the seed in both tiers
    ///
    /// The copy that is dequeued second is discarded as already visited.
    pub fn with_seed(seed: CanonicalUrl) -> Self {
        let mut frontier = Self::new();
        frontier.push(seed.clone(), Tier::High);
        frontier.push(seed, Tier::Low);
        frontier
    }

    /// Appends a URL to the tail of a tier without any duplicate check
    ///
    /// Callers that need deduplication use [`Frontier::offer`].
    pub fn push(&mut self, url: CanonicalUrl, tier: Tier) {
        *self.queued.entry(url.clone()).or_insert(0) += 1;
        match tier {
            Tier::High => self.high.push_back(url),
            Tier::Low => self.low.push_back(url),
        }
    }

    /// Appends a URL unless it is already visited or pending in either tier
    ///
    /// Returns true if the URL was queued.
    pub fn offer(&mut self, url: CanonicalUrl, tier: Tier) -> bool {
        if self.is_known(&url) {
            return false;
        }
        self.push(url, tier);
        true
    }

    /// Removes and returns the head of the high tier, else of the low tier
    pub fn pop_next(&mut self) -> Option<CanonicalUrl> {
        let url = self.high.pop_front().or_else(|| self.low.pop_front())?;
        self.release(&url);
        Some(url)
    }

    /// Pops the next URL that has not been visited and marks it visited
    ///
    /// Pop and mark happen in one call on an exclusively borrowed frontier,
    /// so no two units of work can be handed the same URL.
    pub fn dequeue_unvisited(&mut self) -> Option<CanonicalUrl> {
        while let Some(url) = self.pop_next() {
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
            tracing::trace!("Skipping already visited {}", url);
            self.skipped += 1;
        }
        None
    }

    /// True iff both tiers are empty
    pub fn is_exhausted(&self) -> bool {
        self.high.is_empty() && self.low.is_empty()
    }

    /// True if the URL is visited or pending in either tier
    pub fn is_known(&self, url: &CanonicalUrl) -> bool {
        self.visited.contains(url) || self.queued.contains_key(url)
    }

    /// True if the URL has been dequeued for processing
    pub fn has_visited(&self, url: &CanonicalUrl) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs dequeued so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of pending entries across both tiers
    pub fn pending(&self) -> usize {
        self.high.len() + self.low.len()
    }

    /// Pending high-priority URLs, head first
    pub fn high_priority(&self) -> impl Iterator<Item = &CanonicalUrl> {
        self.high.iter()
    }

    /// Pending low-priority URLs, head first
    pub fn low_priority(&self) -> impl Iterator<Item = &CanonicalUrl> {
        self.low.iter()
    }

    /// Number of stale pending entries discarded at dequeue time
    pub fn skipped_duplicates(&self) -> usize {
        self.skipped
    }

    fn release(&mut self, url: &CanonicalUrl) {
        if let Some(count) = self.queued.get_mut(url) {
            *count -= 1;
            if *count == 0 {
                self.queued.remove(url);
            }
        }
    }
}
