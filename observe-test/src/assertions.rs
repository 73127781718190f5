//! Custom assertions for testing
//!
//! Structural checks on built trees and numeric checks on score maps.

use observe_core::types::TaxonId;
use observe_data::{ScoreMap, TaxonKind, TaxonRecord, TaxonTree};
use std::collections::HashMap;

/// Default tolerance for summed scores
pub const SCORE_EPSILON: f64 = 1e-9;

/// Assert that a score is within `SCORE_EPSILON` of `expected`
pub fn assert_score_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < SCORE_EPSILON,
        "Score {} differs from expected {} by more than {}",
        actual,
        expected,
        SCORE_EPSILON
    );
}

/// Assert the score of a taxon in a score map
pub fn assert_taxon_score(tree: &TaxonTree, scores: &ScoreMap, taxon_id: u32, expected: f64) {
    let actual = scores
        .get_taxon(tree, TaxonId(taxon_id))
        .unwrap_or_else(|| panic!("Taxon {} has no score", taxon_id));
    assert_score_close(actual, expected);
}

/// Assert that a tree faithfully links the records it was built from
///
/// Checks node count, parent linkage by id, and that a node is a leaf exactly
/// when its record carries a leaf index.
pub fn assert_tree_consistent(tree: &TaxonTree, records: &[TaxonRecord]) {
    assert_eq!(
        tree.len(),
        records.len(),
        "Tree has {} nodes but was built from {} records",
        tree.len(),
        records.len()
    );

    let by_id: HashMap<TaxonId, &TaxonRecord> =
        records.iter().map(|r| (r.taxon_id, r)).collect();

    for (id, node) in tree.iter() {
        let record = by_id
            .get(&node.taxon_id)
            .unwrap_or_else(|| panic!("Taxon {} is not among the records", node.taxon_id));

        let parent_taxon = tree.parent(id).map(|p| tree.node(p).taxon_id);
        assert_eq!(
            parent_taxon, record.parent_taxon_id,
            "Taxon {} is linked to the wrong parent",
            node.taxon_id
        );

        assert_eq!(
            node.leaf_index(),
            record.leaf_index,
            "Taxon {} has the wrong leaf index",
            node.taxon_id
        );
        if node.is_leaf() {
            assert!(node.children().is_empty(), "Leaf {} has children", node.taxon_id);
        }
    }
}

/// Assert that every scored internal node holds the sum of its children
pub fn assert_scores_additive(tree: &TaxonTree, scores: &ScoreMap) {
    for (id, score) in scores.iter() {
        if let TaxonKind::Internal { children } = tree.node(id).kind() {
            let sum: f64 = children.iter().filter_map(|c| scores.get(*c)).sum();
            assert!(
                (score - sum).abs() < SCORE_EPSILON,
                "Taxon {} scored {} but its children sum to {}",
                tree.node(id).taxon_id,
                score,
                sum
            );
        }
    }
}
