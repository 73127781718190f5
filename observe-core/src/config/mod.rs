//! Configuration types for observe

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::types::RankOrdinal;
use crate::ObserveError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaxonomyConfig {
    /// Taxonomy dataset (JSON array of taxon records); defaults to OBSERVE_DATA_DIR/taxonomy.json
    #[serde(default)]
    pub dataset_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Number of candidates reported per classification
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Candidates scoring below this are dropped
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    /// Restrict candidates to one rank ordinal (unset = leaves only)
    #[serde(default)]
    pub rank: Option<RankOrdinal>,
}

/// Which expiry rule applies to cached common names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicyKind {
    /// Entries older than `max_age_days` are treated as missing
    Expiring,
    /// Entries never expire
    Permanent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_policy")]
    pub policy: CachePolicyKind,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

// Default value functions
fn default_top_n() -> usize { 5 }
fn default_min_score() -> f64 { 0.0 }
fn default_cache_policy() -> CachePolicyKind { CachePolicyKind::Expiring }
fn default_max_age_days() -> u32 { 7 }

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            min_score: default_min_score(),
            rank: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: default_cache_policy(),
            max_age_days: default_max_age_days(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ObserveError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| ObserveError::Configuration(format!("Failed to parse config: {}", e)))?;
    if !(0.0..=1.0).contains(&config.classification.min_score) {
        return Err(ObserveError::Configuration(format!(
            "classification.min_score must be within [0, 1], got {}",
            config.classification.min_score
        )));
    }
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), ObserveError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| ObserveError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
