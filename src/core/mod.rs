// Ambient infrastructure shared by the traversal engine and the binary

pub mod config;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use config::{NetworkConfig, NetworkConfigBuilder, WordSourceConfig};
pub use errors::{NetworkError, Result};
pub use metrics::{ExecutionTimer, MetricsSnapshot, TraversalMetrics};
