//! Graph induced over class representatives.

use std::collections::BTreeMap;

use super::equivalence::EquivalenceClasses;
use super::graph::{NodeAdjacency, NodeId};

/// Outgoing edges between representatives only.
///
/// This is the graph the path search walks; it has one node per
/// equivalence class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseGraph {
    outgoing: BTreeMap<NodeId, Vec<(NodeId, i64)>>,
}

impl SparseGraph {
    /// Restrict `graph` to the representatives in `classes`.
    pub fn reduce(graph: &[NodeAdjacency], classes: &EquivalenceClasses) -> Self {
        let outgoing = classes
            .representatives()
            .map(|rep| {
                let edges = graph[rep]
                    .outgoing
                    .iter()
                    .filter(|(target, _)| classes.is_representative(**target))
                    .map(|(target, days)| (*target, *days))
                    .collect();
                (rep, edges)
            })
            .collect();

        Self { outgoing }
    }

    /// Outgoing `(target, day gap)` edges of a representative, ascending by target.
    pub fn outgoing(&self, node: NodeId) -> &[(NodeId, i64)] {
        self.outgoing
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of nodes (equivalence classes).
    pub fn len(&self) -> usize {
        self.outgoing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }
}
