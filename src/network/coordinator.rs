//! Coordinator - seeds a traversal, runs the pool and reports the result

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use crate::core::config::NetworkConfig;
use crate::core::errors::{NetworkError, Result};
use crate::core::metrics::ExecutionTimer;
use crate::network::dictionary::DictionaryStore;
use crate::network::pool::{TraversalContext, WorkerPool};
use crate::network::variants::Alphabet;
use crate::report::{NetworkSummary, Reporter, TracingReporter};
use crate::source::load_words;

/// Runs one network exploration per call to [`run`](Coordinator::run)
pub struct Coordinator {
    seed: String,
    pool: WorkerPool,
    alphabet: Alphabet,
    progress_interval: usize,
    expected_size: Option<usize>,
    reporter: Arc<dyn Reporter>,
}

impl Coordinator {
    pub fn new(seed: impl Into<String>, workers: usize) -> Self {
        Self {
            seed: seed.into(),
            pool: WorkerPool::new(workers),
            alphabet: Alphabet::default(),
            progress_interval: 0,
            expected_size: None,
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn from_config(config: &NetworkConfig, reporter: Arc<dyn Reporter>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            seed: config.start_word.clone(),
            pool: WorkerPool::new(config.worker_count),
            alphabet: config.alphabet()?,
            progress_interval: config.progress_interval,
            expected_size: config.expected_size,
            reporter,
        })
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_expected_size(mut self, expected: Option<usize>) -> Self {
        self.expected_size = expected;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Build a dictionary from `words` and explore the seed's network in it
    pub fn run<I, S>(&self, words: I) -> Result<NetworkSummary>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explore(Arc::new(DictionaryStore::from_words(words)))
    }

    /// Explore the seed's network in an already built, unclaimed store.
    ///
    /// An empty store is a valid input and yields a network of size 0. A
    /// failed traversal returns its error without a final report.
    pub fn explore(&self, store: Arc<DictionaryStore>) -> Result<NetworkSummary> {
        let run_id = Uuid::new_v4();
        let span = info_span!("explore", %run_id, seed = %self.seed);
        let _enter = span.enter();

        let started_at = Utc::now();
        let timer = ExecutionTimer::start();
        let words_loaded = store.len();
        let ctx = Arc::new(TraversalContext::new(
            Arc::clone(&store),
            self.alphabet.clone(),
            Arc::clone(&self.reporter),
            self.progress_interval,
        ));

        let mut seed_counted = false;
        if store.is_empty() {
            info!("No words in word list");
        } else {
            seed_counted = ctx.seed(&self.seed);
            if !seed_counted {
                warn!("Seed word is not in the dictionary and will not be counted");
            }
            info!(words_loaded, workers = self.pool.workers(), "Starting traversal");
            if let Err(e) = self.pool.run(Arc::clone(&ctx)) {
                error!(category = e.category(), error = %e, "Traversal failed");
                return Err(e);
            }
        }

        let elapsed = timer.stop();
        let network_size = store.network_size();
        if network_size != store.claimed_count() {
            return Err(NetworkError::internal(format!(
                "claim counter ({}) disagrees with claimed entries ({network_size})",
                store.claimed_count()
            )));
        }

        let summary = NetworkSummary {
            run_id,
            seed: self.seed.clone(),
            seed_counted,
            started_at,
            network_size,
            words_loaded,
            workers: self.pool.workers(),
            elapsed,
            expected_size: self.expected_size,
            matches_expected: self.expected_size.map(|expected| expected == network_size),
            metrics: ctx.metrics().snapshot(),
        };
        self.reporter.finished(&summary);
        Ok(summary)
    }
}

/// Load the configured word source and explore the start word's network.
///
/// A source that fails to deliver is logged and treated as an empty word
/// list, which reports a network of size 0. The traversal runs on the
/// blocking pool so the async runtime stays responsive.
pub async fn explore_network(
    config: &NetworkConfig,
    reporter: Arc<dyn Reporter>,
) -> Result<NetworkSummary> {
    let coordinator = Coordinator::from_config(config, reporter)?;
    let source = config.word_source.to_source(config.fetch_timeout());
    let words = load_words(source.as_ref()).await;

    tokio::task::spawn_blocking(move || coordinator.run(words))
        .await
        .map_err(|e| NetworkError::internal(format!("traversal task failed: {e}")))?
}
