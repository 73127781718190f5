/// Taxonomy identifier types used throughout observe
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a leaf taxon in the classifier output buffer
pub type LeafIndex = usize;

/// Taxonomic rank ordinal as carried by the dataset (kingdom .. species)
pub type RankOrdinal = i32;

/// Taxon ID type - newtype pattern for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub struct TaxonId(pub u32);

impl TaxonId {
    /// Create a new TaxonId
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Key used by per-locale records, e.g. `"12716_en"`
    pub fn locale_key(&self, locale: &str) -> String {
        format!("{}_{}", self.0, locale)
    }
}

impl fmt::Display for TaxonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TaxonId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<TaxonId> for u32 {
    fn from(taxon: TaxonId) -> Self {
        taxon.0
    }
}

impl std::str::FromStr for TaxonId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}
