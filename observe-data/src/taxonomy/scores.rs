//! Bottom-up aggregation of classifier confidences over a taxonomy tree

use super::tree::{NodeId, TaxonKind, TaxonTree};
use observe_core::types::{LeafIndex, TaxonId};
use observe_core::{ClassificationError, ObserveError, ObserveResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Fixed-length confidence vector produced by the classifier, one value per leaf
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassifierOutput {
    values: Vec<f64>,
}

impl ClassifierOutput {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Widen single-precision model output without rounding
    pub fn from_f32(values: &[f32]) -> Self {
        Self {
            values: values.iter().map(|v| f64::from(*v)).collect(),
        }
    }

    /// Decode a JSON array of numbers
    pub fn from_reader<R: Read>(reader: R) -> ObserveResult<Self> {
        let output: Self = serde_json::from_reader(reader)
            .map_err(|e| ObserveError::Parse(format!("Invalid classifier output: {}", e)))?;
        Ok(output)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ObserveResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Bounds-checked read of one leaf's confidence
    pub fn get(&self, index: LeafIndex) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn leaf_score(&self, taxon_id: TaxonId, index: LeafIndex) -> Result<f64, ClassificationError> {
        let value = self.get(index).ok_or(ClassificationError::IndexOutOfRange {
            taxon_id,
            leaf_index: index,
            len: self.values.len(),
        })?;
        if !value.is_finite() {
            return Err(ClassificationError::InvalidOutput(format!(
                "confidence {} at leaf index {} of taxon {} is not finite",
                value, index, taxon_id
            )));
        }
        Ok(value)
    }
}

impl From<Vec<f64>> for ClassifierOutput {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f64> for ClassifierOutput {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Scores of one aggregation run, keyed by node
///
/// Only the subtree the run started from is scored; every other node reads
/// as `None` rather than carrying a value from an earlier run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMap {
    start: NodeId,
    scores: Vec<Option<f64>>,
}

impl ScoreMap {
    /// Node the aggregation started from
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Combined score of the start node
    pub fn total(&self) -> f64 {
        self.scores[self.start.index()].unwrap_or(0.0)
    }

    pub fn get(&self, id: NodeId) -> Option<f64> {
        self.scores.get(id.index()).copied().flatten()
    }

    pub fn get_taxon(&self, tree: &TaxonTree, taxon_id: TaxonId) -> Option<f64> {
        tree.find(taxon_id).and_then(|id| self.get(id))
    }

    /// Number of scored nodes
    pub fn len(&self) -> usize {
        self.scores.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scored nodes in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .filter_map(|(i, score)| score.map(|s| (NodeId::from_index(i), s)))
    }
}

/// Score every node under `start` against one classifier output
///
/// Leaves take their indexed confidence; internal nodes take the sum of their
/// children's scores, added in attachment order so repeated runs are bit-for-bit
/// identical. A childless internal node scores 0.0. Any leaf index outside the
/// output, or a NaN/infinite confidence read by a leaf, fails the whole run.
///
/// Panics if `start` was not issued by `tree`.
pub fn aggregate(
    tree: &TaxonTree,
    start: NodeId,
    output: &ClassifierOutput,
) -> Result<ScoreMap, ClassificationError> {
    let mut scores: Vec<Option<f64>> = vec![None; tree.len()];

    // Post-order guarantees every child is scored before its parent
    for id in tree.post_order(start) {
        let node = tree.node(id);
        let score = match node.kind() {
            TaxonKind::Leaf { index } => output.leaf_score(node.taxon_id, *index)?,
            TaxonKind::Internal { children } => children
                .iter()
                .map(|child| scores[child.index()].unwrap_or(0.0))
                .fold(0.0, |total, s| total + s),
        };
        scores[id.index()] = Some(score);
    }

    let map = ScoreMap { start, scores };
    debug!(
        start = %tree.node(start).taxon_id,
        scored = map.len(),
        total = map.total(),
        "Aggregated classifier output"
    );
    Ok(map)
}

/// Score the whole tree from its root
pub fn aggregate_root(
    tree: &TaxonTree,
    output: &ClassifierOutput,
) -> Result<ScoreMap, ClassificationError> {
    aggregate(tree, tree.root(), output)
}

/// Score many independent classifier outputs against one shared tree
///
/// Runs in parallel; each output gets its own result, so one out-of-range
/// output does not affect the others.
pub fn aggregate_batch(
    tree: &TaxonTree,
    outputs: &[ClassifierOutput],
) -> Vec<Result<ScoreMap, ClassificationError>> {
    outputs
        .par_iter()
        .map(|output| aggregate_root(tree, output))
        .collect()
}
