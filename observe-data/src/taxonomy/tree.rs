//! Taxonomy tree built from a flat list of taxon records
//!
//! Nodes live in a single arena owned by [`TaxonTree`] and refer to each other
//! through [`NodeId`] handles. A node is either a leaf, addressable in the
//! classifier output, or an internal node owning an ordered list of children;
//! never both.

use super::record::TaxonRecord;
use observe_core::types::{LeafIndex, RankOrdinal, TaxonId};
use observe_core::TaxonomyError;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Stable handle to a node of one [`TaxonTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the tree's arena
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Leaf or internal, as a tagged variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonKind {
    /// Terminal taxon addressed by `index` in the classifier output
    Leaf { index: LeafIndex },
    /// Grouping taxon; children are kept in attachment order
    Internal { children: Vec<NodeId> },
}

/// A taxon linked into the tree
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonNode {
    pub taxon_id: TaxonId,
    pub name: String,
    pub rank: RankOrdinal,
    pub parent_taxon_id: Option<TaxonId>,
    pub display_name_english: Option<String>,
    pub display_name_french: Option<String>,
    parent: Option<NodeId>,
    kind: TaxonKind,
}

impl TaxonNode {
    fn from_record(record: TaxonRecord) -> Self {
        let kind = match record.leaf_index {
            Some(index) => TaxonKind::Leaf { index },
            None => TaxonKind::Internal {
                children: Vec::new(),
            },
        };

        Self {
            taxon_id: record.taxon_id,
            name: record.name,
            rank: record.rank,
            parent_taxon_id: record.parent_taxon_id,
            display_name_english: record.display_name_english,
            display_name_french: record.display_name_french,
            parent: None,
            kind,
        }
    }

    pub fn kind(&self) -> &TaxonKind {
        &self.kind
    }

    /// Back-reference to the parent node; `None` only for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in attachment order; always empty for leaves
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            TaxonKind::Leaf { .. } => &[],
            TaxonKind::Internal { children } => children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, TaxonKind::Leaf { .. })
    }

    pub fn leaf_index(&self) -> Option<LeafIndex> {
        match self.kind {
            TaxonKind::Leaf { index } => Some(index),
            TaxonKind::Internal { .. } => None,
        }
    }

    /// Display name for a locale (`"en"`, `"fr"`, `"fr-CA"`, ...), falling back
    /// to the scientific name
    pub fn display_name(&self, locale: &str) -> &str {
        let language = locale
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or(locale)
            .to_ascii_lowercase();

        let localized = match language.as_str() {
            "en" => self.display_name_english.as_deref(),
            "fr" => self.display_name_french.as_deref(),
            _ => None,
        };

        localized.unwrap_or(&self.name)
    }
}

/// Taxonomy hierarchy with O(1) lookup by taxon id
///
/// Structurally read-only once built. Scores are never stored on the nodes;
/// see [`crate::taxonomy::aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonTree {
    nodes: Vec<TaxonNode>,
    by_taxon: HashMap<TaxonId, NodeId>,
    root: NodeId,
}

impl TaxonTree {
    /// Build a tree from records given in any order
    ///
    /// Fails without returning any part of the tree when the records do not
    /// form exactly one connected, cycle-free hierarchy.
    pub fn build<I>(records: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = TaxonRecord>,
    {
        let result = Self::link(records);
        match &result {
            Ok(tree) => debug!(
                taxa = tree.len(),
                leaves = tree.leaf_count(),
                root = %tree.node(tree.root).taxon_id,
                "Built taxonomy tree"
            ),
            Err(e) => warn!(error = %e, "Rejected taxonomy dataset"),
        }
        result
    }

    fn link<I>(records: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = TaxonRecord>,
    {
        // Every node exists before any parent lookup, so input order is irrelevant
        let records = records.into_iter();
        let mut nodes: Vec<TaxonNode> = Vec::with_capacity(records.size_hint().0);
        let mut by_taxon: HashMap<TaxonId, NodeId> = HashMap::with_capacity(nodes.capacity());

        for record in records {
            let id = NodeId(nodes.len());
            if by_taxon.insert(record.taxon_id, id).is_some() {
                return Err(TaxonomyError::DuplicateTaxonId(record.taxon_id));
            }
            nodes.push(TaxonNode::from_record(record));
        }

        if nodes.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let roots: Vec<NodeId> = (0..nodes.len())
            .map(NodeId)
            .filter(|id| nodes[id.0].parent_taxon_id.is_none())
            .collect();
        let root = match roots.as_slice() {
            [] => return Err(TaxonomyError::NoRoot),
            [root] => *root,
            _ => {
                return Err(TaxonomyError::MultipleRoots {
                    roots: roots.iter().map(|id| nodes[id.0].taxon_id).collect(),
                })
            }
        };

        for index in 0..nodes.len() {
            let Some(parent_taxon_id) = nodes[index].parent_taxon_id else {
                continue;
            };
            let child = NodeId(index);
            let child_taxon_id = nodes[index].taxon_id;
            let parent = *by_taxon
                .get(&parent_taxon_id)
                .ok_or(TaxonomyError::MissingParent {
                    taxon_id: child_taxon_id,
                    parent_id: parent_taxon_id,
                })?;

            let parent_node = &mut nodes[parent.0];
            match &mut parent_node.kind {
                TaxonKind::Leaf { .. } => {
                    return Err(TaxonomyError::LeafWithChildren {
                        taxon_id: parent_node.taxon_id,
                        child_id: child_taxon_id,
                    })
                }
                TaxonKind::Internal { children } => children.push(child),
            }
            nodes[index].parent = Some(parent);
        }

        let tree = Self {
            nodes,
            by_taxon,
            root,
        };
        tree.check_connected()?;
        Ok(tree)
    }

    /// A parent cycle detached from the root leaves its members unreachable
    fn check_connected(&self) -> Result<(), TaxonomyError> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        let mut reached = 0;

        while let Some(id) = stack.pop() {
            if seen[id.0] {
                continue;
            }
            seen[id.0] = true;
            reached += 1;
            stack.extend(self.nodes[id.0].children().iter().copied());
        }

        if reached == self.nodes.len() {
            return Ok(());
        }

        let first = seen
            .iter()
            .position(|visited| !visited)
            .map(|index| self.nodes[index].taxon_id)
            .unwrap_or_default();

        Err(TaxonomyError::Unreachable {
            root: self.nodes[self.root.0].taxon_id,
            first,
            count: self.nodes.len() - reached,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built tree; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node behind a handle issued by this tree
    ///
    /// Panics if `id` came from a different tree with more nodes.
    pub fn node(&self, id: NodeId) -> &TaxonNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&TaxonNode> {
        self.nodes.get(id.0)
    }

    /// Handle of the node with this taxon id
    pub fn find(&self, taxon_id: TaxonId) -> Option<NodeId> {
        self.by_taxon.get(&taxon_id).copied()
    }

    pub fn node_by_taxon(&self, taxon_id: TaxonId) -> Option<&TaxonNode> {
        self.find(taxon_id).map(|id| self.node(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// All nodes in arena (input) order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TaxonNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Leaves ordered by leaf index
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves: Vec<(LeafIndex, NodeId)> = self
            .iter()
            .filter_map(|(id, node)| node.leaf_index().map(|index| (index, id)))
            .collect();
        leaves.sort();
        leaves.into_iter().map(|(_, id)| id).collect()
    }

    /// Largest leaf index; a classifier output must be longer than this
    pub fn max_leaf_index(&self) -> Option<LeafIndex> {
        self.nodes.iter().filter_map(TaxonNode::leaf_index).max()
    }

    /// Nodes of a rank, in pre-order from the root
    pub fn nodes_at_rank(&self, rank: RankOrdinal) -> Vec<NodeId> {
        self.pre_order(self.root)
            .into_iter()
            .filter(|id| self.node(*id).rank == rank)
            .collect()
    }

    /// Number of edges between the root and `id`
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    pub fn max_depth(&self) -> usize {
        (0..self.nodes.len())
            .map(|i| self.depth(NodeId(i)))
            .max()
            .unwrap_or(0)
    }

    /// Parent, grandparent, ... up to and including the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// `start` followed by its descendants, parents before children
    pub fn pre_order(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            order.push(id);
            // Reversed so the first child is visited first
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Descendants of `start` followed by `start`, children before parents,
    /// siblings in attachment order
    pub fn post_order(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![(start, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            stack.extend(self.children(id).iter().rev().map(|child| (*child, false)));
        }
        order
    }
}
