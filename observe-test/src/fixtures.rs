//! Test fixtures and data generators
//!
//! Common taxonomies and classifier outputs for use across the workspace.

use observe_core::types::{RankOrdinal, TaxonId};
use observe_data::{ClassifierOutput, TaxonRecord, TaxonTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SPECIES: RankOrdinal = 10;
pub const GENUS: RankOrdinal = 20;
pub const FAMILY: RankOrdinal = 30;
pub const CLASS: RankOrdinal = 50;

/// Record builder with test-friendly defaults
#[derive(Debug, Clone)]
pub struct TestTaxon {
    record: TaxonRecord,
}

impl TestTaxon {
    /// Internal taxon of the given rank
    pub fn new(taxon_id: u32, name: impl Into<String>, rank: RankOrdinal) -> Self {
        Self {
            record: TaxonRecord::new(taxon_id, name, rank),
        }
    }

    /// Species-rank leaf
    pub fn leaf(taxon_id: u32, name: impl Into<String>, leaf_index: usize) -> Self {
        Self::new(taxon_id, name, SPECIES).at_leaf(leaf_index)
    }

    pub fn under(mut self, parent: u32) -> Self {
        self.record.parent_taxon_id = Some(TaxonId(parent));
        self
    }

    pub fn at_leaf(mut self, leaf_index: usize) -> Self {
        self.record.leaf_index = Some(leaf_index);
        self
    }

    pub fn named(mut self, english: impl Into<String>, french: impl Into<String>) -> Self {
        self.record.display_name_english = Some(english.into());
        self.record.display_name_french = Some(french.into());
        self
    }

    pub fn build(self) -> TaxonRecord {
        self.record
    }
}

impl From<TestTaxon> for TaxonRecord {
    fn from(taxon: TestTaxon) -> Self {
        taxon.build()
    }
}

/// Small bird taxonomy: class, two families, three genera, five species
///
/// ```text
/// Aves (1)
/// ├── Turdidae (10)
/// │   └── Turdus (100)
/// │       ├── Turdus migratorius (1000) leaf 0
/// │       └── Turdus merula (1001) leaf 1
/// └── Corvidae (11)
///     ├── Corvus (110)
///     │   ├── Corvus corax (1100) leaf 2
///     │   └── Corvus brachyrhynchos (1101) leaf 3
///     └── Pica (111)
///         └── Pica pica (1110) leaf 4
/// ```
pub fn bird_records() -> Vec<TaxonRecord> {
    vec![
        TestTaxon::new(1, "Aves", CLASS).build(),
        TestTaxon::new(10, "Turdidae", FAMILY).under(1).build(),
        TestTaxon::new(100, "Turdus", GENUS).under(10).build(),
        TestTaxon::leaf(1000, "Turdus migratorius", 0)
            .under(100)
            .named("American Robin", "Merle d'Amérique")
            .build(),
        TestTaxon::leaf(1001, "Turdus merula", 1)
            .under(100)
            .named("Eurasian Blackbird", "Merle noir")
            .build(),
        TestTaxon::new(11, "Corvidae", FAMILY).under(1).build(),
        TestTaxon::new(110, "Corvus", GENUS).under(11).build(),
        TestTaxon::leaf(1100, "Corvus corax", 2)
            .under(110)
            .named("Common Raven", "Grand Corbeau")
            .build(),
        TestTaxon::leaf(1101, "Corvus brachyrhynchos", 3)
            .under(110)
            .named("American Crow", "Corneille d'Amérique")
            .build(),
        TestTaxon::new(111, "Pica", GENUS).under(11).build(),
        TestTaxon::leaf(1110, "Pica pica", 4)
            .under(111)
            .named("Eurasian Magpie", "Pie bavarde")
            .build(),
    ]
}

/// [`bird_records`] linked into a tree
pub fn bird_taxonomy() -> TaxonTree {
    match TaxonTree::build(bird_records()) {
        Ok(tree) => tree,
        Err(e) => panic!("bird fixture must build: {}", e),
    }
}

/// Classifier output for [`bird_records`]: robin most likely, crows second
pub fn bird_scores() -> ClassifierOutput {
    ClassifierOutput::new(vec![0.5, 0.05, 0.1, 0.25, 0.1])
}

/// Deterministic confidences summing to 1.0
pub fn random_scores(len: usize, seed: u64) -> ClassifierOutput {
    let mut rng = StdRng::seed_from_u64(seed);
    let raw: Vec<f64> = (0..len).map(|_| rng.gen_range(0.0..1.0)).collect();
    let total: f64 = raw.iter().sum();
    if total == 0.0 {
        return ClassifierOutput::new(raw);
    }
    raw.into_iter().map(|v| v / total).collect()
}

/// Balanced taxonomy with `fanout` children per internal node and `depth`
/// levels below the root; leaves are numbered left to right
pub fn generate_records(fanout: usize, depth: usize) -> Vec<TaxonRecord> {
    let mut records = vec![TaxonRecord::new(1, "root", (depth as RankOrdinal + 1) * 10)];
    let mut frontier = vec![1u32];
    let mut next_id = 2u32;
    let mut next_leaf = 0usize;

    for level in 1..=depth {
        let rank = (depth - level + 1) as RankOrdinal * 10;
        let mut next_frontier = Vec::with_capacity(frontier.len() * fanout);
        for parent in &frontier {
            for _ in 0..fanout {
                let mut record =
                    TaxonRecord::new(next_id, format!("taxon {}", next_id), rank).with_parent(*parent);
                if level == depth {
                    record = record.with_leaf_index(next_leaf);
                    next_leaf += 1;
                }
                records.push(record);
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    records
}
