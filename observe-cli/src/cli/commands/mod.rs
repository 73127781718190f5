pub mod config;
pub mod identify;
pub mod lineage;
pub mod stats;

use anyhow::Result;
use observe_core::{config_path, default_taxonomy_path, load_config, Config};
use observe_data::{load_taxonomy, TaxonTree};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output format shared by the reporting commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Load the configuration file
///
/// An explicit path must exist; the default location is optional and falls
/// back to built-in defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Ok(load_config(path)?);
    }

    let path = config_path();
    if path.exists() {
        debug!(path = %path.display(), "Loading configuration");
        Ok(load_config(&path)?)
    } else {
        Ok(Config::default())
    }
}

/// Dataset from the command line, else the configuration, else the data dir
pub fn taxonomy_path(arg: Option<&Path>, config: &Config) -> PathBuf {
    arg.map(Path::to_path_buf)
        .or_else(|| config.taxonomy.dataset_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(default_taxonomy_path)
}

pub fn open_taxonomy(arg: Option<&Path>, config: &Config) -> Result<TaxonTree> {
    let path = taxonomy_path(arg, config);
    Ok(load_taxonomy(&path)?)
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(observe_core::ObserveError::from)?;
    println!("{}", json);
    Ok(())
}
