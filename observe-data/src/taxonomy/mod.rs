pub mod lineage;
pub mod ranking;
pub mod record;
pub mod scores;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use lineage::TaxonInfo;
pub use ranking::{best_leaf, top_candidates, Candidate, CandidateScope};
pub use record::{load_records, load_records_from_path, TaxonRecord};
pub use scores::{aggregate, aggregate_batch, aggregate_root, ClassifierOutput, ScoreMap};
pub use stats::{format_tree, RankStats, TaxonomyStats};
pub use tree::{NodeId, TaxonKind, TaxonNode, TaxonTree};

use observe_core::ObserveResult;
use std::path::Path;
use tracing::info;

/// Load a JSON dataset from disk and link it into a tree
pub fn load_taxonomy<P: AsRef<Path>>(path: P) -> ObserveResult<TaxonTree> {
    let path = path.as_ref();
    let records = load_records_from_path(path)?;
    let tree = TaxonTree::build(records)?;
    info!(
        path = %path.display(),
        taxa = tree.len(),
        leaves = tree.leaf_count(),
        "Loaded taxonomy"
    );
    Ok(tree)
}
