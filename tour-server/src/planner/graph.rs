//! Day-weighted adjacency between date-sorted matches.
//!
//! Nodes are positions in the sorted match list. An edge `i -> j` means a
//! traveller can attend match `i` and then match `j`: they are on different
//! days, fewer than `max_days` apart, and the venues are within `max_dist_km`.
//! Edges always point forward in the sort order, so the graph is a DAG.

use std::collections::BTreeMap;

use crate::domain::{Match, days_between};

/// Index of a match in the date-sorted match list.
pub type NodeId = usize;

/// Edges of a single node, keyed by neighbour with the day gap as weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAdjacency {
    pub incoming: BTreeMap<NodeId, i64>,
    pub outgoing: BTreeMap<NodeId, i64>,
}

impl NodeAdjacency {
    /// True if the node has no edges in either direction.
    pub fn is_isolated(&self) -> bool {
        self.incoming.is_empty() && self.outgoing.is_empty()
    }
}

/// Build the adjacency list for `matches`, which must be sorted by date.
pub fn build_graph(matches: &[Match], max_dist_km: f64, max_days: u32) -> Vec<NodeAdjacency> {
    let max_days = i64::from(max_days);
    let mut graph = vec![NodeAdjacency::default(); matches.len()];

    for (i, from) in matches.iter().enumerate() {
        for (j, to) in matches.iter().enumerate().skip(i + 1) {
            let days = days_between(from, to);
            // Sorted by date: every later match is at least this far away
            if days >= max_days {
                break;
            }
            if days == 0 {
                continue;
            }
            if from.location().distance_to(to.location()) <= max_dist_km {
                graph[i].outgoing.insert(j, days);
                graph[j].incoming.insert(i, days);
            }
        }
    }

    graph
}
