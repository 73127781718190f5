//! Species observation data layer
//!
//! Builds taxonomy trees from flat datasets, scores them against classifier
//! output, and carries the observation, species and common-name records the
//! application persists elsewhere.

pub mod cache;
pub mod models;
pub mod taxonomy;

// Re-export taxonomy types
pub use taxonomy::{
    aggregate, aggregate_batch, best_leaf, load_records, load_taxonomy, top_candidates,
    Candidate, CandidateScope, ClassifierOutput, NodeId, ScoreMap, TaxonInfo, TaxonKind,
    TaxonNode, TaxonRecord, TaxonTree, TaxonomyStats,
};
// Re-export models
pub use models::{JsonObservation, LocationCoordinate, PhotoObservation, Species, TaxonCommonName};
pub use cache::{CachePolicy, CommonNameCache, InMemoryCommonNameCache};
