use super::load_settings;
use crate::cli::output::*;
use anyhow::Result;
use clap::Subcommand;
use observe_core::{config_path, describe_paths, save_config, Config, ObserveError};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show {
        /// Also print the resolved directories
        #[arg(long)]
        paths: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(command: ConfigCommands, explicit: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommands::Show { paths } => {
            let config = load_settings(explicit)?;
            let toml = toml::to_string_pretty(&config)
                .map_err(|e| ObserveError::Serialization(e.to_string()))?;
            print!("{}", toml);
            if paths {
                println!();
                println!("{}", describe_paths());
            }
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = explicit.map(Path::to_path_buf).unwrap_or_else(config_path);
            if path.exists() && !force {
                warning(&format!(
                    "{} already exists; use --force to overwrite",
                    path.display()
                ));
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(ObserveError::from)?;
            }
            save_config(&path, &Config::default())?;
            success(&format!("Wrote default configuration to {}", path.display()));
            Ok(())
        }
    }
}
