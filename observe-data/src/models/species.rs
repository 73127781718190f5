use crate::taxonomy::{NodeId, TaxonInfo, TaxonTree};
use observe_core::types::{LeafIndex, TaxonId};
use observe_core::{ObserveError, ObserveResult};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// A species the user has observed at least once
///
/// The lineage is stored as encoded JSON so the record can be persisted as an
/// opaque blob; [`Species::lineage`] decodes it on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: Uuid,
    pub name: String,
    pub leaf_index: LeafIndex,
    pub taxon_id: TaxonId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lineage_data: Option<Vec<u8>>,
    #[serde(default)]
    pub observations: Vec<Uuid>,
}

impl Species {
    pub fn new(name: impl Into<String>, leaf_index: LeafIndex, taxon_id: TaxonId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            leaf_index,
            taxon_id,
            lineage_data: None,
            observations: Vec::new(),
        }
    }

    /// Species for a leaf of the tree, lineage included
    pub fn from_leaf(tree: &TaxonTree, id: NodeId) -> ObserveResult<Self> {
        let node = tree.node(id);
        let leaf_index = node.leaf_index().ok_or_else(|| {
            ObserveError::InvalidInput(format!(
                "Taxon {} ({}) is not a leaf",
                node.taxon_id, node.name
            ))
        })?;

        let mut species = Self::new(node.name.clone(), leaf_index, node.taxon_id);
        species.set_lineage(&tree.lineage(node.taxon_id)?)?;
        Ok(species)
    }

    /// Decoded lineage; `None` when absent or unreadable
    pub fn lineage(&self) -> Option<Vec<TaxonInfo>> {
        let data = self.lineage_data.as_ref()?;
        match serde_json::from_slice(data) {
            Ok(lineage) => Some(lineage),
            Err(e) => {
                warn!(species = %self.id, error = %e, "Discarding unreadable lineage");
                None
            }
        }
    }

    pub fn set_lineage(&mut self, lineage: &[TaxonInfo]) -> ObserveResult<()> {
        self.lineage_data = Some(serde_json::to_vec(lineage)?);
        Ok(())
    }

    pub fn clear_lineage(&mut self) {
        self.lineage_data = None;
    }

    /// Raw encoded lineage, as persisted
    pub fn lineage_data(&self) -> Option<&[u8]> {
        self.lineage_data.as_deref()
    }

    pub fn with_lineage_data(mut self, data: Vec<u8>) -> Self {
        self.lineage_data = Some(data);
        self
    }

    /// Link an observation; linking the same one twice is a no-op
    pub fn add_observation(&mut self, observation: Uuid) {
        if !self.observations.contains(&observation) {
            self.observations.push(observation);
        }
    }
}
