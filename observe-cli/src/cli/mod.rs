pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "observe",
    version,
    about = "Identify species from classifier output using a taxonomy tree",
    long_about = "Observe links a flat taxonomy dataset into a tree, aggregates a classifier's \
                  per-species confidences up through every rank, and reports the most likely \
                  taxa together with their lineage."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads for batch scoring (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,

    /// Configuration file (defaults to $OBSERVE_HOME/config.toml)
    #[arg(long, global = true, value_name = "PATH", env = "OBSERVE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score classifier output against a taxonomy and rank the candidates
    Identify(commands::identify::IdentifyArgs),

    /// Show the path from the root to a taxon
    Lineage(commands::lineage::LineageArgs),

    /// Show statistics about a taxonomy dataset
    Stats(commands::stats::StatsArgs),

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}
