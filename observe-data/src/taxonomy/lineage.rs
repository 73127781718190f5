use super::tree::{NodeId, TaxonNode, TaxonTree};
use observe_core::types::{RankOrdinal, TaxonId};
use observe_core::TaxonomyError;
use serde::{Deserialize, Serialize};

/// One step of a lineage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonInfo {
    pub taxon_id: TaxonId,
    pub name: String,
    pub rank: RankOrdinal,
}

impl From<&TaxonNode> for TaxonInfo {
    fn from(node: &TaxonNode) -> Self {
        Self {
            taxon_id: node.taxon_id,
            name: node.name.clone(),
            rank: node.rank,
        }
    }
}

impl TaxonTree {
    /// Nodes from `id` up to and including the root
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        std::iter::once(id).chain(self.ancestors(id)).collect()
    }

    /// Root-first path to a taxon
    pub fn lineage(&self, taxon_id: TaxonId) -> Result<Vec<TaxonInfo>, TaxonomyError> {
        let id = self
            .find(taxon_id)
            .ok_or(TaxonomyError::UnknownTaxon(taxon_id))?;

        let mut path = self.path_to_root(id);
        path.reverse();
        Ok(path
            .into_iter()
            .map(|id| TaxonInfo::from(self.node(id)))
            .collect())
    }

    /// Nearest node of `rank` on the path from `id` to the root, `id` included
    pub fn ancestor_at_rank(&self, id: NodeId, rank: RankOrdinal) -> Option<NodeId> {
        self.path_to_root(id)
            .into_iter()
            .find(|candidate| self.node(*candidate).rank == rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::record::TaxonRecord;
    use pretty_assertions::assert_eq;

    fn tree() -> TaxonTree {
        TaxonTree::build(vec![
            TaxonRecord::new(3, "Turdus migratorius", 10)
                .with_parent(2)
                .with_leaf_index(0),
            TaxonRecord::new(2, "Turdus", 20).with_parent(1),
            TaxonRecord::new(1, "Aves", 50),
            TaxonRecord::new(5, "Corvus corax", 10)
                .with_parent(1)
                .with_leaf_index(1),
        ])
        .unwrap()
    }

    #[test]
    fn test_lineage_is_root_first() {
        let tree = tree();
        let lineage = tree.lineage(TaxonId(3)).unwrap();
        let names: Vec<&str> = lineage.iter().map(|info| info.name.as_str()).collect();
        assert_eq!(names, vec!["Aves", "Turdus", "Turdus migratorius"]);
        assert_eq!(lineage[1].rank, 20);
    }

    #[test]
    fn test_lineage_of_root() {
        let lineage = tree().lineage(TaxonId(1)).unwrap();
        assert_eq!(
            lineage,
            vec![TaxonInfo {
                taxon_id: TaxonId(1),
                name: "Aves".to_string(),
                rank: 50
            }]
        );
    }

    #[test]
    fn test_lineage_unknown_taxon() {
        assert_eq!(
            tree().lineage(TaxonId(42)).unwrap_err(),
            TaxonomyError::UnknownTaxon(TaxonId(42))
        );
    }

    #[test]
    fn test_ancestor_at_rank() {
        let tree = tree();
        let robin = tree.find(TaxonId(3)).unwrap();
        let raven = tree.find(TaxonId(5)).unwrap();

        assert_eq!(tree.ancestor_at_rank(robin, 20), tree.find(TaxonId(2)));
        assert_eq!(tree.ancestor_at_rank(robin, 10), Some(robin));
        assert_eq!(tree.ancestor_at_rank(raven, 20), None);
    }

    #[test]
    fn test_info_wire_names() {
        let info = TaxonInfo {
            taxon_id: TaxonId(7),
            name: "Pica".to_string(),
            rank: 20,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"taxonId":7,"name":"Pica","rank":20}"#);
    }
}
