//! Taxonomy structure and classification error types

use crate::types::{LeafIndex, TaxonId};
use thiserror::Error;

/// A taxonomy dataset that cannot be turned into a tree
///
/// Every variant rejects the whole dataset; no partial tree is ever handed out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    #[error("Taxonomy is empty")]
    Empty,

    #[error("No root taxon: every record declares a parent")]
    NoRoot,

    #[error("Multiple root taxa: {}", format_ids(.roots))]
    MultipleRoots { roots: Vec<TaxonId> },

    #[error("Duplicate taxon id {0}")]
    DuplicateTaxonId(TaxonId),

    #[error("Taxon {taxon_id} references missing parent {parent_id}")]
    MissingParent { taxon_id: TaxonId, parent_id: TaxonId },

    #[error("Taxon {taxon_id} has a leaf index and child {child_id}")]
    LeafWithChildren { taxon_id: TaxonId, child_id: TaxonId },

    #[error("{count} taxa are not reachable from root {root} (first: {first})")]
    Unreachable {
        root: TaxonId,
        first: TaxonId,
        count: usize,
    },

    #[error("Unknown taxon {0}")]
    UnknownTaxon(TaxonId),
}

/// Failure while scoring a tree against one classifier output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    #[error(
        "Leaf index {leaf_index} of taxon {taxon_id} is out of range for a classifier output of length {len}"
    )]
    IndexOutOfRange {
        taxon_id: TaxonId,
        leaf_index: LeafIndex,
        len: usize,
    },

    #[error("Invalid classifier output: {0}")]
    InvalidOutput(String),
}

fn format_ids(ids: &[TaxonId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
