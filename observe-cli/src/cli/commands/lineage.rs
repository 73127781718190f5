use super::{open_taxonomy, print_json, OutputFormat};
use crate::cli::output::*;
use anyhow::Result;
use clap::Args;
use colored::*;
use observe_core::{Config, ObserveError, TaxonId};
use std::path::PathBuf;

#[derive(Args)]
pub struct LineageArgs {
    /// Taxon to trace back to the root
    #[arg(value_name = "TAXON_ID")]
    pub taxon_id: TaxonId,

    /// Taxonomy dataset (JSON array of taxon records)
    #[arg(short, long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Locale for display names (en, fr)
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: LineageArgs, config: &Config) -> Result<()> {
    let tree = open_taxonomy(args.taxonomy.as_deref(), config)?;
    let lineage = tree
        .lineage(args.taxon_id)
        .map_err(ObserveError::from)?;

    if args.format == OutputFormat::Json {
        return print_json(&lineage);
    }

    section_header_with_line(&format!("Lineage of taxon {}", args.taxon_id));
    for (depth, step) in lineage.iter().enumerate() {
        let is_last = depth == lineage.len() - 1;
        let display = tree
            .node_by_taxon(step.taxon_id)
            .map(|node| node.display_name(&args.locale))
            .unwrap_or(&step.name);

        let label = if display == step.name {
            step.name.bold().to_string()
        } else {
            format!("{} ({})", display.bold(), step.name.italic())
        };
        print!("{}", "   ".repeat(depth));
        tree_item(
            is_last,
            &label,
            Some(&format!("rank {}, id {}", step.rank, step.taxon_id)),
        );
    }

    Ok(())
}
