use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::commands::load_settings;
use crate::cli::{Cli, Commands};
use observe_core::ObserveError;

fn main() {
    let cli = Cli::parse();

    // Initialize logging with OBSERVE_LOG environment variable support
    let log_level = std::env::var("OBSERVE_LOG").unwrap_or_else(|_| {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
        .to_string()
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<ObserveError>() {
            Some(ObserveError::Configuration(_)) => 2,
            Some(ObserveError::Io(_)) => 3,
            Some(ObserveError::Parse(_)) | Some(ObserveError::Serialization(_)) => 4,
            Some(ObserveError::Taxonomy(_)) => 5,
            Some(ObserveError::Classification(_)) => 6,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // 0 keeps rayon's default of one thread per core
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()?;
    }

    if cli.verbose > 0 {
        eprintln!("Using {} threads", rayon::current_num_threads());
    }

    let explicit = cli.config.as_deref();
    match cli.command {
        Commands::Identify(args) => {
            crate::cli::commands::identify::run(args, &load_settings(explicit)?)
        }
        Commands::Lineage(args) => {
            crate::cli::commands::lineage::run(args, &load_settings(explicit)?)
        }
        Commands::Stats(args) => crate::cli::commands::stats::run(args, &load_settings(explicit)?),
        Commands::Config { command } => crate::cli::commands::config::run(command, explicit),
    }
}
