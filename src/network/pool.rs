//! Fixed-size worker pool draining the frontier.
//!
//! Termination is tracked with an `outstanding` counter: the number of words
//! pushed to the frontier whose expansion has not finished yet. It is raised
//! before every push and lowered only after the popped word's expansion has
//! pushed everything it claimed, so it reaches zero exactly when the frontier
//! is empty and no worker is mid-expansion. Nothing can raise it again after
//! that, because only expanding workers push.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, trace};

use crate::core::errors::{NetworkError, Result};
use crate::core::metrics::TraversalMetrics;
use crate::network::dictionary::{ClaimOutcome, DictionaryStore};
use crate::network::frontier::Frontier;
use crate::network::variants::{for_each_variant, Alphabet};
use crate::report::Reporter;

/// Empty polls answered with `yield_now` before a worker starts sleeping
const BACKOFF_YIELD_THRESHOLD: u32 = 16;
/// Empty polls answered with a short sleep before switching to a longer one
const BACKOFF_LONG_THRESHOLD: u32 = 256;

/// State shared by every worker of one traversal
pub struct TraversalContext {
    store: Arc<DictionaryStore>,
    frontier: Frontier<String>,
    alphabet: Alphabet,
    metrics: Arc<TraversalMetrics>,
    reporter: Arc<dyn Reporter>,
    progress_interval: usize,
    outstanding: AtomicUsize,
    aborted: AtomicBool,
}

impl TraversalContext {
    pub fn new(
        store: Arc<DictionaryStore>,
        alphabet: Alphabet,
        reporter: Arc<dyn Reporter>,
        progress_interval: usize,
    ) -> Self {
        Self {
            store,
            frontier: Frontier::new(),
            alphabet,
            metrics: Arc::new(TraversalMetrics::new()),
            reporter,
            progress_interval,
            outstanding: AtomicUsize::new(0),
            aborted: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<DictionaryStore> {
        &self.store
    }

    pub fn frontier(&self) -> &Frontier<String> {
        &self.frontier
    }

    pub fn metrics(&self) -> &Arc<TraversalMetrics> {
        &self.metrics
    }

    /// Claim the seed (if it is a dictionary word) and queue it for expansion.
    ///
    /// The seed is queued even when absent so its dictionary neighbours are
    /// still explored. Returns whether the seed was claimed.
    pub fn seed(&self, word: &str) -> bool {
        let claimed = self.store.try_claim(word);
        if claimed {
            self.record_claim();
        }
        self.enqueue(word.to_owned());
        claimed
    }

    /// Expand one word: claim every dictionary variant nobody owns yet and
    /// queue it. Returns the number of words this call claimed.
    pub fn expand(&self, word: &str) -> usize {
        let mut claimed = 0;
        let mut hits = 0u64;
        let generated = for_each_variant(word, &self.alphabet, |candidate| {
            match self.store.claim(candidate) {
                ClaimOutcome::Absent => {}
                ClaimOutcome::AlreadyClaimed => hits += 1,
                ClaimOutcome::Claimed => {
                    hits += 1;
                    claimed += 1;
                    self.record_claim();
                    self.enqueue(candidate.to_owned());
                }
            }
        });
        self.metrics.record_expansion(generated as u64, hits);
        trace!(word, claimed, "Expanded word");
        claimed
    }

    /// Words queued or being expanded
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// True once every queued word has been fully expanded
    pub fn is_drained(&self) -> bool {
        self.outstanding() == 0
    }

    fn enqueue(&self, word: String) {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        self.frontier.push(word);
    }

    fn finish_one(&self) {
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
    }

    fn record_claim(&self) {
        let found = self.metrics.record_claim();
        if self.progress_interval > 0 && found % self.progress_interval as u64 == 0 {
            self.reporter.progress(found as usize);
        }
    }

    fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}

/// Flags the traversal as aborted if its worker unwinds, so the other
/// workers stop waiting for an `outstanding` count that will never drop.
struct AbortOnPanic<'a>(&'a TraversalContext);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.aborted.store(true, Ordering::Release);
        }
    }
}

/// Worker pool executor
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run workers until the context is drained, then join them all.
    pub fn run(&self, ctx: Arc<TraversalContext>) -> Result<()> {
        let mut handles = Vec::with_capacity(self.workers);

        for worker_id in 0..self.workers {
            let worker_ctx = Arc::clone(&ctx);
            let spawned = thread::Builder::new()
                .name(format!("word-friends-worker-{worker_id}"))
                .spawn(move || run_worker(worker_id, &worker_ctx));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    error!(worker_id, error = %e, "Failed to spawn worker thread");
                    ctx.aborted.store(true, Ordering::Release);
                    join_all(handles)?;
                    return Err(NetworkError::io("spawn worker thread", e));
                }
            }
        }

        debug!(workers = self.workers, "Workers started");
        join_all(handles)
    }
}

fn join_all(handles: Vec<thread::JoinHandle<()>>) -> Result<()> {
    let mut panicked = None;
    for (worker_id, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            error!(worker_id, "Worker panicked");
            panicked.get_or_insert(worker_id);
        }
    }
    match panicked {
        Some(worker) => Err(NetworkError::WorkerPanicked { worker }),
        None => Ok(()),
    }
}

fn run_worker(worker_id: usize, ctx: &TraversalContext) {
    let _guard = AbortOnPanic(ctx);
    let mut expanded = 0u64;
    let mut empty_polls = 0u64;
    let mut consecutive_empty = 0u32;

    loop {
        if ctx.is_aborted() {
            break;
        }
        match ctx.frontier.pop() {
            Some(word) => {
                consecutive_empty = 0;
                ctx.expand(&word);
                ctx.finish_one();
                expanded += 1;
            }
            None => {
                empty_polls += 1;
                if ctx.is_drained() {
                    break;
                }
                // another worker is still expanding and may push more
                if consecutive_empty < BACKOFF_YIELD_THRESHOLD {
                    thread::yield_now();
                } else if consecutive_empty < BACKOFF_LONG_THRESHOLD {
                    thread::sleep(Duration::from_micros(10));
                } else {
                    thread::sleep(Duration::from_micros(100));
                }
                consecutive_empty = consecutive_empty.saturating_add(1);
            }
        }
    }

    ctx.metrics.record_empty_polls(empty_polls);
    debug!(worker_id, expanded, empty_polls, "Worker finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;

    fn context(
        words: &[&str],
        progress_interval: usize,
    ) -> (Arc<TraversalContext>, Arc<RecordingReporter>) {
        let reporter = Arc::new(RecordingReporter::new());
        let store = Arc::new(DictionaryStore::from_words(words.iter().copied()));
        let ctx = TraversalContext::new(
            store,
            Alphabet::default(),
            reporter.clone(),
            progress_interval,
        );
        (Arc::new(ctx), reporter)
    }

    #[test]
    fn test_expand_claims_neighbours_once() {
        let (ctx, _) = context(&["cat", "cot", "cats", "dog"], 0);
        assert!(ctx.store().try_claim("cat"));

        assert_eq!(ctx.expand("cat"), 2);
        assert_eq!(ctx.frontier().len(), 2);
        assert_eq!(ctx.outstanding(), 2);

        // a second expansion of the same word finds everything claimed
        assert_eq!(ctx.expand("cat"), 0);
        assert_eq!(ctx.frontier().len(), 2);
        assert_eq!(ctx.store().network_size(), 3);
        assert!(!ctx.store().is_claimed("dog"));

        let snapshot = ctx.metrics().snapshot();
        assert_eq!(snapshot.words_expanded, 2);
        assert_eq!(snapshot.candidates_generated, 2 * 185);
    }

    #[test]
    fn test_seed_absent_is_queued_but_not_claimed() {
        let (ctx, _) = context(&["cot"], 0);
        assert!(!ctx.seed("cat"));
        assert_eq!(ctx.outstanding(), 1);
        assert_eq!(ctx.frontier().pop().as_deref(), Some("cat"));
        assert_eq!(ctx.store().network_size(), 0);
    }

    #[test]
    fn test_pool_drains_chain() {
        let words = ["a", "ab", "abc", "abcd", "abcde", "abcdef", "zzzz"];
        for workers in [1, 2, 8] {
            let (ctx, _) = context(&words, 0);
            assert!(ctx.seed("a"));
            WorkerPool::new(workers).run(Arc::clone(&ctx)).unwrap();

            assert!(ctx.is_drained());
            assert!(ctx.frontier().is_empty());
            assert_eq!(ctx.store().network_size(), 6, "workers = {workers}");
            assert_eq!(ctx.metrics().snapshot().words_expanded, 6);
        }
    }

    #[test]
    fn test_progress_every_interval() {
        let words: Vec<String> = ('a'..='z').map(|c| c.to_string()).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let (ctx, reporter) = context(&refs, 5);
        assert!(ctx.seed("a"));
        WorkerPool::new(4).run(Arc::clone(&ctx)).unwrap();

        assert_eq!(ctx.store().network_size(), 26);
        let mut progress = reporter.progress_values();
        progress.sort_unstable();
        assert_eq!(progress, vec![5, 10, 15, 20, 25]);
    }

    #[test]
    fn test_zero_workers_still_runs_one() {
        assert_eq!(WorkerPool::new(0).workers(), 1);
    }
}
