use super::scores::ScoreMap;
use super::tree::{NodeId, TaxonTree};
use observe_core::types::RankOrdinal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Shape summary of a taxonomy tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomyStats {
    pub total_taxa: usize,
    pub leaf_count: usize,
    pub internal_count: usize,
    /// Internal taxa with no children; they always score 0.0
    pub childless_internal: usize,
    pub max_depth: usize,
    pub max_leaf_index: Option<usize>,
    /// Keyed by rank ordinal, highest rank last
    pub ranks: BTreeMap<RankOrdinal, RankStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankStats {
    pub rank: RankOrdinal,
    pub count: usize,
    pub leaves: usize,
    pub percentage: f64,
}

impl TaxonomyStats {
    pub fn from_tree(tree: &TaxonTree) -> Self {
        let mut ranks: BTreeMap<RankOrdinal, RankStats> = BTreeMap::new();
        let mut childless_internal = 0;

        for (_, node) in tree.iter() {
            if !node.is_leaf() && node.children().is_empty() {
                childless_internal += 1;
            }
            let entry = ranks.entry(node.rank).or_insert(RankStats {
                rank: node.rank,
                count: 0,
                leaves: 0,
                percentage: 0.0,
            });
            entry.count += 1;
            if node.is_leaf() {
                entry.leaves += 1;
            }
        }

        let total_taxa = tree.len();
        for stats in ranks.values_mut() {
            stats.percentage = (stats.count as f64 / total_taxa as f64) * 100.0;
        }

        let leaf_count = tree.leaf_count();
        Self {
            total_taxa,
            leaf_count,
            internal_count: total_taxa - leaf_count,
            childless_internal,
            max_depth: tree.max_depth(),
            max_leaf_index: tree.max_leaf_index(),
            ranks,
        }
    }
}

/// Render the subtree under `start` as an ASCII tree
///
/// Scored nodes show their score; `max_depth` collapses deeper levels into a
/// child count.
pub fn format_tree(
    tree: &TaxonTree,
    start: NodeId,
    scores: Option<&ScoreMap>,
    max_depth: Option<usize>,
) -> String {
    let mut result = String::new();
    format_node(tree, start, scores, max_depth, "", true, 0, &mut result);
    result
}

#[allow(clippy::too_many_arguments)]
fn format_node(
    tree: &TaxonTree,
    id: NodeId,
    scores: Option<&ScoreMap>,
    max_depth: Option<usize>,
    prefix: &str,
    is_last: bool,
    current_depth: usize,
    result: &mut String,
) {
    let node = tree.node(id);

    if current_depth > 0 {
        result.push_str(prefix);
        result.push_str(if is_last { "└── " } else { "├── " });
    }

    result.push_str(&format!("{} [{}]", node.name, node.rank));
    if let Some(score) = scores.and_then(|s| s.get(id)) {
        result.push_str(&format!(" {:.4}", score));
    }
    result.push('\n');

    let children = node.children();
    if let Some(max) = max_depth {
        if current_depth >= max {
            if !children.is_empty() {
                result.push_str(&format!("{}    ... ({} children)\n", prefix, children.len()));
            }
            return;
        }
    }

    let child_prefix = if current_depth == 0 {
        String::new()
    } else {
        format!("{}{}   ", prefix, if is_last { " " } else { "│" })
    };
    for (i, child) in children.iter().enumerate() {
        format_node(
            tree,
            *child,
            scores,
            max_depth,
            &child_prefix,
            i == children.len() - 1,
            current_depth + 1,
            result,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::record::TaxonRecord;
    use crate::taxonomy::scores::{aggregate_root, ClassifierOutput};

    fn tree() -> TaxonTree {
        TaxonTree::build(vec![
            TaxonRecord::new(1, "Aves", 50),
            TaxonRecord::new(2, "Turdus", 20).with_parent(1),
            TaxonRecord::new(3, "Turdus migratorius", 10)
                .with_parent(2)
                .with_leaf_index(0),
            TaxonRecord::new(4, "Turdus merula", 10)
                .with_parent(2)
                .with_leaf_index(1),
            TaxonRecord::new(5, "Corvidae", 30).with_parent(1),
        ])
        .unwrap()
    }

    #[test]
    fn test_stats_from_tree() {
        let stats = TaxonomyStats::from_tree(&tree());
        assert_eq!(stats.total_taxa, 5);
        assert_eq!(stats.leaf_count, 2);
        assert_eq!(stats.internal_count, 3);
        assert_eq!(stats.childless_internal, 1);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.max_leaf_index, Some(1));

        let species = &stats.ranks[&10];
        assert_eq!(species.count, 2);
        assert_eq!(species.leaves, 2);
        assert!((species.percentage - 40.0).abs() < 1e-9);
        assert_eq!(stats.ranks.keys().copied().collect::<Vec<_>>(), vec![10, 20, 30, 50]);
    }

    #[test]
    fn test_format_tree_with_scores() {
        let tree = tree();
        let scores = aggregate_root(&tree, &ClassifierOutput::new(vec![0.25, 0.5])).unwrap();
        let rendered = format_tree(&tree, tree.root(), Some(&scores), None);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Aves [50] 0.7500");
        assert_eq!(lines[1], "├── Turdus [20] 0.7500");
        assert_eq!(lines[2], "│   ├── Turdus migratorius [10] 0.2500");
        assert_eq!(lines[3], "│   └── Turdus merula [10] 0.5000");
        assert_eq!(lines[4], "└── Corvidae [30] 0.0000");
    }

    #[test]
    fn test_format_tree_depth_limit() {
        let tree = tree();
        let rendered = format_tree(&tree, tree.root(), None, Some(1));
        assert!(rendered.contains("├── Turdus [20]\n"));
        assert!(rendered.contains("... (2 children)"));
        assert!(!rendered.contains("merula"));
    }
}
