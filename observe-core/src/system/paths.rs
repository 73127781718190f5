use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static OBSERVE_HOME: OnceLock<PathBuf> = OnceLock::new();
static OBSERVE_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static OBSERVE_CACHE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the observe home directory
/// Checks OBSERVE_HOME environment variable, falls back to ${HOME}/.observe
pub fn observe_home() -> PathBuf {
    OBSERVE_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("OBSERVE_HOME") {
                PathBuf::from(path)
            } else {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".observe")
            }
        })
        .clone()
}

/// Get the observe data directory
/// Checks OBSERVE_DATA_DIR environment variable, falls back to OBSERVE_HOME
pub fn observe_data_dir() -> PathBuf {
    OBSERVE_DATA_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("OBSERVE_DATA_DIR") {
                PathBuf::from(path)
            } else {
                observe_home()
            }
        })
        .clone()
}

/// Get the cache directory (common-name cache snapshots)
/// Checks OBSERVE_CACHE_DIR environment variable, falls back to OBSERVE_DATA_DIR/cache
pub fn observe_cache_dir() -> PathBuf {
    OBSERVE_CACHE_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("OBSERVE_CACHE_DIR") {
                PathBuf::from(path)
            } else {
                observe_data_dir().join("cache")
            }
        })
        .clone()
}

/// Get the configuration file path
/// Returns: OBSERVE_HOME/config.toml
pub fn config_path() -> PathBuf {
    observe_home().join("config.toml")
}

/// Get the default taxonomy dataset path
/// Returns: OBSERVE_DATA_DIR/taxonomy.json
pub fn default_taxonomy_path() -> PathBuf {
    observe_data_dir().join("taxonomy.json")
}

/// Check if running in a custom data directory
pub fn is_custom_data_dir() -> bool {
    std::env::var("OBSERVE_DATA_DIR").is_ok() || std::env::var("OBSERVE_HOME").is_ok()
}

/// Get a human-readable description of the current path configuration
pub fn describe_paths() -> String {
    format!(
        "Observe Paths:\n  \
        Home: {}\n  \
        Data: {}\n  \
        Cache: {}\n  \
        Config: {}\n  \
        Taxonomy: {}\n  \
        Custom: {}",
        observe_home().display(),
        observe_data_dir().display(),
        observe_cache_dir().display(),
        config_path().display(),
        default_taxonomy_path().display(),
        if is_custom_data_dir() {
            "Yes"
        } else {
            "No (using defaults)"
        }
    )
}
