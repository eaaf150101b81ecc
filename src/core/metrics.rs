//! Traversal metrics collection
//!
//! Lock-free counters updated by the worker pool while it explores a
//! network, plus a serializable snapshot taken once the run is over.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Traversal counters shared by all workers
#[derive(Debug, Default)]
pub struct TraversalMetrics {
    /// Words popped from the frontier and expanded
    pub words_expanded: AtomicU64,
    /// Edit-distance-1 candidates generated
    pub candidates_generated: AtomicU64,
    /// Candidates found in the dictionary
    pub dictionary_hits: AtomicU64,
    /// Successful claims (network members)
    pub claims: AtomicU64,
    /// Frontier polls that found no work
    pub empty_polls: AtomicU64,
}

impl TraversalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one expansion and the number of candidates it produced
    pub fn record_expansion(&self, candidates: u64, hits: u64) {
        self.words_expanded.fetch_add(1, Ordering::Relaxed);
        self.candidates_generated.fetch_add(candidates, Ordering::Relaxed);
        self.dictionary_hits.fetch_add(hits, Ordering::Relaxed);
    }

    /// Record a successful claim. Returns the claim count including this one.
    pub fn record_claim(&self) -> u64 {
        self.claims.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_empty_polls(&self, polls: u64) {
        if polls > 0 {
            self.empty_polls.fetch_add(polls, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            words_expanded: self.words_expanded.load(Ordering::Relaxed),
            candidates_generated: self.candidates_generated.load(Ordering::Relaxed),
            dictionary_hits: self.dictionary_hits.load(Ordering::Relaxed),
            claims: self.claims.load(Ordering::Relaxed),
            empty_polls: self.empty_polls.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub words_expanded: u64,
    pub candidates_generated: u64,
    pub dictionary_hits: u64,
    pub claims: u64,
    pub empty_polls: u64,
}

impl MetricsSnapshot {
    /// Fraction of dictionary hits that were already claimed (0.0 to 1.0)
    pub fn duplicate_hit_rate(&self) -> f64 {
        if self.dictionary_hits == 0 {
            0.0
        } else {
            // the seed is claimed without being a hit
            let claimed_hits = self.claims.min(self.dictionary_hits);
            1.0 - claimed_hits as f64 / self.dictionary_hits as f64
        }
    }

    /// Expansions per second over the given wall time
    pub fn expansions_per_second(&self, elapsed: Duration) -> f64 {
        if elapsed.is_zero() {
            0.0
        } else {
            self.words_expanded as f64 / elapsed.as_secs_f64()
        }
    }
}

/// Timer for measuring execution duration
pub struct ExecutionTimer {
    start: Instant,
}

impl ExecutionTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration since timer started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop timer and return duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}
