//! Progress and completion reporting.

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::info;
use uuid::Uuid;

use crate::core::metrics::MetricsSnapshot;

/// Sink for traversal progress and the final result.
///
/// `progress` may be called from any worker thread; `finished` is called
/// exactly once per successful run, after every worker has stopped. A run
/// that ends in an error returns it to the caller without calling `finished`.
pub trait Reporter: Send + Sync {
    fn progress(&self, found: usize);
    fn finished(&self, summary: &NetworkSummary);
}

/// Outcome of one network exploration
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub run_id: Uuid,
    pub seed: String,
    /// Whether the seed itself was in the dictionary and counted
    pub seed_counted: bool,
    pub started_at: DateTime<Utc>,
    pub network_size: usize,
    pub words_loaded: usize,
    pub workers: usize,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub expected_size: Option<usize>,
    pub matches_expected: Option<bool>,
    pub metrics: MetricsSnapshot,
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(millis(elapsed))
}

fn millis(elapsed: &Duration) -> f64 {
    elapsed.as_micros() as f64 / 1000.0
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found: {} words in network of \"{}\"; took {:.3}ms",
            self.network_size,
            self.seed,
            millis(&self.elapsed)
        )?;
        if let (Some(expected), Some(matched)) = (self.expected_size, self.matches_expected) {
            write!(f, " (expected {expected}: {})", if matched { "match" } else { "MISMATCH" })?;
        }
        Ok(())
    }
}

/// Logs progress and the summary through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn progress(&self, found: usize) {
        info!(found, "Exploring network");
    }

    fn finished(&self, summary: &NetworkSummary) {
        info!(
            run_id = %summary.run_id,
            seed = %summary.seed,
            network_size = summary.network_size,
            words_loaded = summary.words_loaded,
            workers = summary.workers,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            expansions = summary.metrics.words_expanded,
            "Network exploration finished"
        );
        if let (Some(expected), Some(false)) = (summary.expected_size, summary.matches_expected) {
            tracing::warn!(
                expected,
                actual = summary.network_size,
                "Network size does not match the expected value"
            );
        }
    }
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    progress: Mutex<Vec<usize>>,
    summaries: Mutex<Vec<NetworkSummary>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress values in the order they arrived
    pub fn progress_values(&self) -> Vec<usize> {
        self.progress
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Every summary received; a well-behaved run produces exactly one
    pub fn summaries(&self) -> Vec<NetworkSummary> {
        self.summaries
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn last_summary(&self) -> Option<NetworkSummary> {
        self.summaries().pop()
    }
}

impl Reporter for RecordingReporter {
    fn progress(&self, found: usize) {
        if let Ok(mut progress) = self.progress.lock() {
            progress.push(found);
        }
    }

    fn finished(&self, summary: &NetworkSummary) {
        if let Ok(mut summaries) = self.summaries.lock() {
            summaries.push(summary.clone());
        }
    }
}
