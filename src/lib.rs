//! # word-friends
//!
//! Measures the "social network" of a word: every dictionary word reachable
//! from it through single-character insertions, deletions or substitutions.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use word_friends::{explore_network, NetworkConfig, TracingReporter};
//!
//! #[tokio::main]
//! async fn main() -> word_friends::Result<()> {
//!     let config = NetworkConfig::builder()
//!         .start_word("causes")
//!         .word_file("word_friends/word.list")
//!         .build()?;
//!     let summary = explore_network(&config, Arc::new(TracingReporter)).await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

// Core infrastructure modules
pub mod core;

// Traversal engine and its collaborators
pub mod network;
pub mod report;
pub mod source;

// Re-exports for convenience
pub use crate::core::config::{NetworkConfig, NetworkConfigBuilder, WordSourceConfig};
pub use crate::core::errors::{NetworkError, Result};
pub use crate::core::metrics::{MetricsSnapshot, TraversalMetrics};
pub use network::{
    explore_network, variants_of, Alphabet, Coordinator, DictionaryStore, Frontier, WorkerPool,
};
pub use report::{NetworkSummary, RecordingReporter, Reporter, TracingReporter};
pub use source::{load_words, parse_word_list, FileSource, MemorySource, UrlSource, WordSource};
