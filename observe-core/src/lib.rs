//! Core types shared across all observe crates

pub mod config;
pub mod error;
pub mod system;
pub mod types;

// Re-export commonly used types
pub use config::{default_config, load_config, save_config, CachePolicyKind, Config};
pub use error::{
    ClassificationError, ObserveError, ObserveResult, TaxonomyError,
};
pub use types::{LeafIndex, TaxonId};

// Re-export system utilities
pub use system::{
    config_path, default_taxonomy_path, describe_paths, observe_cache_dir, observe_data_dir,
    observe_home,
};

/// Version information for the observe project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
