// Concurrent traversal engine

pub mod coordinator;
pub mod dictionary;
pub mod frontier;
pub mod pool;
pub mod variants;

pub use coordinator::{explore_network, Coordinator};
pub use dictionary::{ClaimOutcome, DictionaryStore};
pub use frontier::Frontier;
pub use pool::{TraversalContext, WorkerPool};
pub use variants::{for_each_variant, variant_count, variants_of, Alphabet};
