/// Core types shared across all observe modules
pub mod taxonomy;

// Re-export commonly used types at module level
pub use taxonomy::{LeafIndex, RankOrdinal, TaxonId};
