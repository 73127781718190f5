//! Flat taxon records as they arrive from the taxonomy dataset

use observe_core::types::{LeafIndex, RankOrdinal, TaxonId};
use observe_core::{ObserveError, ObserveResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One taxon of the dataset, before it is linked into a tree
///
/// Field names follow the dataset: `leafIdx`, `english` and `french` are the
/// wire names of the leaf index and display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonRecord {
    pub taxon_id: TaxonId,
    pub name: String,
    pub rank: RankOrdinal,
    #[serde(
        default,
        rename = "leafIdx",
        alias = "leafIndex",
        skip_serializing_if = "Option::is_none"
    )]
    pub leaf_index: Option<LeafIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_taxon_id: Option<TaxonId>,
    #[serde(
        default,
        rename = "english",
        alias = "displayNameEnglish",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name_english: Option<String>,
    #[serde(
        default,
        rename = "french",
        alias = "displayNameFrench",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name_french: Option<String>,
}

impl TaxonRecord {
    /// Create a record with no parent and no leaf index
    pub fn new(taxon_id: u32, name: impl Into<String>, rank: RankOrdinal) -> Self {
        Self {
            taxon_id: TaxonId(taxon_id),
            name: name.into(),
            rank,
            leaf_index: None,
            parent_taxon_id: None,
            display_name_english: None,
            display_name_french: None,
        }
    }

    /// Set the parent taxon
    pub fn with_parent(mut self, parent: u32) -> Self {
        self.parent_taxon_id = Some(TaxonId(parent));
        self
    }

    /// Mark as a leaf addressed by `index` in the classifier output
    pub fn with_leaf_index(mut self, index: LeafIndex) -> Self {
        self.leaf_index = Some(index);
        self
    }

    /// Set the English display name
    pub fn with_english(mut self, name: impl Into<String>) -> Self {
        self.display_name_english = Some(name.into());
        self
    }

    /// Set the French display name
    pub fn with_french(mut self, name: impl Into<String>) -> Self {
        self.display_name_french = Some(name.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_taxon_id.is_none()
    }
}

/// Decode a JSON array of taxon records
pub fn load_records<R: Read>(reader: R) -> ObserveResult<Vec<TaxonRecord>> {
    serde_json::from_reader(reader)
        .map_err(|e| ObserveError::Parse(format!("Invalid taxonomy dataset: {}", e)))
}

/// Decode a JSON taxonomy dataset from disk
pub fn load_records_from_path<P: AsRef<Path>>(path: P) -> ObserveResult<Vec<TaxonRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    load_records(BufReader::new(file)).map_err(|e| match e {
        ObserveError::Parse(msg) => ObserveError::Parse(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}
