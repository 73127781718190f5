pub mod paths;

// Re-export commonly used functions
pub use paths::{
    config_path, default_taxonomy_path, describe_paths, is_custom_data_dir, observe_cache_dir,
    observe_data_dir, observe_home,
};
