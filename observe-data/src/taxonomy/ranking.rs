//! Ranked identification candidates read from a score map

use super::scores::ScoreMap;
use super::tree::{NodeId, TaxonTree};
use observe_core::types::{LeafIndex, RankOrdinal, TaxonId};
use serde::Serialize;
use std::cmp::Ordering;

/// Which scored nodes compete for a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateScope {
    /// Species-level answers only
    #[default]
    Leaves,
    /// Every node of one rank ordinal
    Rank(RankOrdinal),
    /// Any scored node
    All,
}

impl CandidateScope {
    fn admits(&self, tree: &TaxonTree, id: NodeId) -> bool {
        let node = tree.node(id);
        match self {
            CandidateScope::Leaves => node.is_leaf(),
            CandidateScope::Rank(rank) => node.rank == *rank,
            CandidateScope::All => true,
        }
    }
}

/// A scored taxon ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub taxon_id: TaxonId,
    pub name: String,
    pub rank: RankOrdinal,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_index: Option<LeafIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub french: Option<String>,
}

impl Candidate {
    fn new(tree: &TaxonTree, id: NodeId, score: f64) -> Self {
        let node = tree.node(id);
        Self {
            taxon_id: node.taxon_id,
            name: node.name.clone(),
            rank: node.rank,
            score,
            leaf_index: node.leaf_index(),
            english: node.display_name_english.clone(),
            french: node.display_name_french.clone(),
        }
    }
}

/// Highest first; equal scores fall back to ascending taxon id
fn by_score(tree: &TaxonTree, a: &(NodeId, f64), b: &(NodeId, f64)) -> Ordering {
    b.1.total_cmp(&a.1)
        .then_with(|| tree.node(a.0).taxon_id.cmp(&tree.node(b.0).taxon_id))
}

/// Up to `limit` candidates in `scope` scoring at least `min_score`
pub fn top_candidates(
    tree: &TaxonTree,
    scores: &ScoreMap,
    scope: CandidateScope,
    min_score: f64,
    limit: usize,
) -> Vec<Candidate> {
    let mut scored: Vec<(NodeId, f64)> = scores
        .iter()
        .filter(|(id, score)| *score >= min_score && scope.admits(tree, *id))
        .collect();
    scored.sort_by(|a, b| by_score(tree, a, b));

    scored
        .into_iter()
        .take(limit)
        .map(|(id, score)| Candidate::new(tree, id, score))
        .collect()
}

/// Single most likely leaf, if any leaf was scored
pub fn best_leaf(tree: &TaxonTree, scores: &ScoreMap) -> Option<Candidate> {
    scores
        .iter()
        .filter(|(id, _)| tree.node(*id).is_leaf())
        .min_by(|a, b| by_score(tree, a, b))
        .map(|(id, score)| Candidate::new(tree, id, score))
}
