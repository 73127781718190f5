use super::{open_taxonomy, print_json, OutputFormat};
use crate::cli::output::*;
use anyhow::Result;
use clap::Args;
use observe_core::Config;
use observe_data::taxonomy::format_tree;
use observe_data::TaxonomyStats;
use std::path::PathBuf;

#[derive(Args)]
pub struct StatsArgs {
    /// Taxonomy dataset (JSON array of taxon records)
    #[arg(short, long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Also print the tree
    #[arg(long)]
    pub tree: bool,

    /// Maximum depth of the printed tree
    #[arg(long, requires = "tree")]
    pub depth: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: StatsArgs, config: &Config) -> Result<()> {
    let tree = open_taxonomy(args.taxonomy.as_deref(), config)?;
    let stats = TaxonomyStats::from_tree(&tree);

    if args.format == OutputFormat::Json {
        return print_json(&stats);
    }

    section_header_with_line("Taxonomy Statistics Report");

    subsection_header("Structure");
    tree_item(false, "Total Taxa", Some(&format_number(stats.total_taxa)));
    tree_item(false, "Leaves", Some(&format_number(stats.leaf_count)));
    tree_item(false, "Internal", Some(&format_number(stats.internal_count)));
    tree_item(false, "Max Depth", Some(&stats.max_depth.to_string()));
    let output_len = stats
        .max_leaf_index
        .map(|i| format_number(i + 1))
        .unwrap_or_else(|| "-".to_string());
    tree_item(true, "Classifier Output Length", Some(&output_len));

    if stats.childless_internal > 0 {
        warning(&format!(
            "{} internal taxa have no children and always score 0",
            stats.childless_internal
        ));
    }

    subsection_header("Ranks");
    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("Taxa"),
        header_cell("Leaves"),
        header_cell("Share"),
    ]);
    // Highest rank first
    for rank in stats.ranks.values().rev() {
        table.add_row(vec![
            number_cell(rank.rank),
            number_cell(format_number(rank.count)),
            number_cell(format_number(rank.leaves)),
            number_cell(format!("{:.1}%", rank.percentage)),
        ]);
    }
    println!("{}", table);

    if args.tree {
        subsection_header("Tree");
        print!("{}", format_tree(&tree, tree.root(), None, args.depth));
    }

    Ok(())
}
