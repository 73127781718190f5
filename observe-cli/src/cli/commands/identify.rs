use super::{open_taxonomy, print_json, OutputFormat};
use crate::cli::output::*;
use anyhow::Result;
use clap::Args;
use colored::*;
use comfy_table::Cell;
use observe_core::types::RankOrdinal;
use observe_core::{Config, ObserveError};
use observe_data::taxonomy::format_tree;
use observe_data::{
    aggregate, aggregate_batch, best_leaf, top_candidates, Candidate, CandidateScope,
    ClassifierOutput, ScoreMap, TaxonTree,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct IdentifyArgs {
    /// Taxonomy dataset (JSON array of taxon records)
    #[arg(short, long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Classifier output (JSON array of confidences); repeat to score several
    #[arg(short, long, value_name = "FILE", required = true)]
    pub scores: Vec<PathBuf>,

    /// Rank candidates at this rank ordinal instead of leaves
    #[arg(short, long, conflicts_with = "all")]
    pub rank: Option<RankOrdinal>,

    /// Rank every scored taxon regardless of rank
    #[arg(long)]
    pub all: bool,

    /// Number of candidates to report
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Drop candidates scoring below this
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Locale for display names (en, fr)
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Print the scored tree below the candidate table
    #[arg(long)]
    pub tree: bool,

    /// Maximum depth of the printed tree
    #[arg(long, requires = "tree")]
    pub depth: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Identification {
    scores: String,
    total: f64,
    best: Option<Candidate>,
    candidates: Vec<Candidate>,
}

pub fn run(args: IdentifyArgs, config: &Config) -> Result<()> {
    let min_score = args.min_score.unwrap_or(config.classification.min_score);
    if !(0.0..=1.0).contains(&min_score) {
        return Err(ObserveError::InvalidInput(format!(
            "min-score must be between 0 and 1, got {}",
            min_score
        ))
        .into());
    }
    let limit = args.top.unwrap_or(config.classification.top_n);
    let scope = if args.all {
        CandidateScope::All
    } else {
        match args.rank.or(config.classification.rank) {
            Some(rank) => CandidateScope::Rank(rank),
            None => CandidateScope::Leaves,
        }
    };

    let tree = open_taxonomy(args.taxonomy.as_deref(), config)?;
    let outputs = args
        .scores
        .iter()
        .map(ClassifierOutput::load)
        .collect::<Result<Vec<_>, ObserveError>>()?;

    let results = if outputs.len() == 1 {
        vec![aggregate(&tree, tree.root(), &outputs[0])]
    } else {
        aggregate_batch(&tree, &outputs)
    };

    let mut reports = Vec::with_capacity(results.len());
    let mut score_maps = Vec::with_capacity(results.len());
    for (path, result) in args.scores.iter().zip(results) {
        let scores = result.map_err(ObserveError::from)?;
        reports.push(Identification {
            scores: path.display().to_string(),
            total: scores.total(),
            best: best_leaf(&tree, &scores),
            candidates: top_candidates(&tree, &scores, scope, min_score, limit),
        });
        score_maps.push(scores);
    }

    match args.format {
        OutputFormat::Json => match reports.as_slice() {
            [single] => print_json(single)?,
            _ => print_json(&reports)?,
        },
        OutputFormat::Text => {
            for (report, scores) in reports.iter().zip(&score_maps) {
                print_identification(&tree, report, scores, &args);
            }
        }
    }

    Ok(())
}

fn print_identification(
    tree: &TaxonTree,
    report: &Identification,
    scores: &ScoreMap,
    args: &IdentifyArgs,
) {
    section_header_with_line(&format!("Identification: {}", report.scores));

    if let Some(best) = &report.best {
        success(&format!(
            "Best match: {} ({}) {}",
            display_name(tree, best, &args.locale).bold(),
            best.name.italic(),
            format_score(best.score)
        ));
    }
    info(&format!("Total confidence: {}", format_score(report.total)));

    if report.candidates.is_empty() {
        empty("No candidates above the minimum score");
    } else {
        let mut table = create_standard_table();
        table.set_header(vec![
            header_cell("#"),
            header_cell("Taxon"),
            header_cell("Name"),
            header_cell("Common name"),
            header_cell("Rank"),
            header_cell("Score"),
        ]);
        for (i, candidate) in report.candidates.iter().enumerate() {
            table.add_row(vec![
                number_cell(i + 1),
                number_cell(candidate.taxon_id),
                Cell::new(&candidate.name),
                Cell::new(display_name(tree, candidate, &args.locale)),
                number_cell(candidate.rank),
                number_cell(format_score(candidate.score)),
            ]);
        }
        println!("{}", table);
    }

    if args.tree {
        subsection_header("Scored tree");
        print!("{}", format_tree(tree, scores.start(), Some(scores), args.depth));
    }
}

fn display_name<'a>(tree: &'a TaxonTree, candidate: &'a Candidate, locale: &str) -> &'a str {
    tree.node_by_taxon(candidate.taxon_id)
        .map(|node| node.display_name(locale))
        .unwrap_or(&candidate.name)
}
