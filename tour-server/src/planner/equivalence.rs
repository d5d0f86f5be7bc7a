//! Grouping of structurally interchangeable nodes.
//!
//! Two nodes are equivalent when they fall on the same date and have the
//! same incoming and outgoing edges (same neighbours, same weights). Any
//! itinerary through one of them is also an itinerary through the other,
//! so the search only visits one representative per class and the others
//! are substituted back in afterwards.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::Match;

use super::graph::{NodeAdjacency, NodeId};

/// Grouping key for a node.
///
/// `isolated` holds the node's own index when it has no edges at all, so
/// isolated nodes on the same date are never merged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct EquivalenceKey {
    date: NaiveDate,
    isolated: Option<NodeId>,
    incoming: Vec<(NodeId, i64)>,
    outgoing: Vec<(NodeId, i64)>,
}

impl EquivalenceKey {
    fn new(node: NodeId, m: &Match, adjacency: &NodeAdjacency) -> Self {
        Self {
            date: m.date(),
            isolated: adjacency.is_isolated().then_some(node),
            incoming: adjacency.incoming.iter().map(|(n, w)| (*n, *w)).collect(),
            outgoing: adjacency.outgoing.iter().map(|(n, w)| (*n, *w)).collect(),
        }
    }
}

/// Equivalence classes keyed by representative (the smallest member).
///
/// Every node belongs to exactly one class; members are in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceClasses {
    classes: BTreeMap<NodeId, Vec<NodeId>>,
    representative: Vec<Option<NodeId>>,
}

impl EquivalenceClasses {
    /// Group the nodes of `graph`. `matches` is the sorted list the graph
    /// was built from.
    pub fn compute(matches: &[Match], graph: &[NodeAdjacency]) -> Self {
        debug_assert_eq!(matches.len(), graph.len());

        let mut by_key: BTreeMap<EquivalenceKey, Vec<NodeId>> = BTreeMap::new();
        for (node, (m, adjacency)) in matches.iter().zip(graph).enumerate() {
            by_key
                .entry(EquivalenceKey::new(node, m, adjacency))
                .or_default()
                .push(node);
        }

        let mut representative = vec![None; graph.len()];
        let mut classes = BTreeMap::new();
        for members in by_key.into_values() {
            // Nodes were pushed in ascending order
            let rep = members[0];
            for &member in &members {
                representative[member] = Some(rep);
            }
            classes.insert(rep, members);
        }

        Self {
            classes,
            representative,
        }
    }

    /// Build from explicit groups of nodes.
    ///
    /// Members are sorted and the smallest becomes the representative.
    pub fn from_groups(groups: impl IntoIterator<Item = Vec<NodeId>>) -> Self {
        let mut classes = BTreeMap::new();
        let mut representative = Vec::new();
        for mut members in groups {
            if members.is_empty() {
                continue;
            }
            members.sort_unstable();
            members.dedup();
            let rep = members[0];
            for &member in &members {
                if representative.len() <= member {
                    representative.resize(member + 1, None);
                }
                representative[member] = Some(rep);
            }
            classes.insert(rep, members);
        }
        Self {
            classes,
            representative,
        }
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// True if `node` is the representative of its class.
    pub fn is_representative(&self, node: NodeId) -> bool {
        self.classes.contains_key(&node)
    }

    /// Representatives in ascending order.
    pub fn representatives(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.classes.keys().copied()
    }

    /// Members of the class represented by `rep`, ascending.
    pub fn members(&self, rep: NodeId) -> &[NodeId] {
        self.classes.get(&rep).map(Vec::as_slice).unwrap_or_default()
    }

    /// Representative of the class containing `node`.
    pub fn representative_of(&self, node: NodeId) -> Option<NodeId> {
        self.representative.get(node).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;
    use crate::planner::graph::build_graph;
    use chrono::{TimeZone, Utc};

    fn fixture(name: &str, day: u32, hour: u32, loc: Location) -> Match {
        let kickoff = Utc.with_ymd_and_hms(2025, 9, day, hour, 0, 0).unwrap();
        Match::new(name, "Away", kickoff, loc)
    }

    const LONDON: Location = Location::new(51.4816869, -0.1910336);
    const FULHAM: Location = Location::new(51.4749218, -0.2217448);
    const MUNICH: Location = Location::new(48.2188, 11.6236);

    fn classes_of(matches: &[Match], max_dist: f64, max_days: u32) -> EquivalenceClasses {
        let graph = build_graph(matches, max_dist, max_days);
        EquivalenceClasses::compute(matches, &graph)
    }

    #[test]
    fn same_day_same_neighbours_are_grouped() {
        let matches = vec![
            fixture("A", 1, 15, LONDON),
            fixture("B", 1, 20, FULHAM),
            fixture("C", 2, 20, LONDON),
        ];
        let classes = classes_of(&matches, 10.0, 3);

        assert_eq!(classes.len(), 2);
        assert_eq!(classes.members(0), &[0, 1]);
        assert_eq!(classes.members(2), &[2]);
        assert_eq!(classes.representative_of(1), Some(0));
        assert!(!classes.is_representative(1));
    }

    #[test]
    fn isolated_nodes_stay_apart() {
        let matches = vec![
            fixture("A", 1, 15, LONDON),
            fixture("B", 1, 20, LONDON),
            fixture("C", 1, 21, MUNICH),
        ];
        let classes = classes_of(&matches, 10.0, 3);

        assert_eq!(classes.len(), 3);
        assert!(classes.representatives().all(|rep| classes.members(rep).len() == 1));
    }

    #[test]
    fn chain_nodes_are_distinct() {
        let matches = vec![
            fixture("A", 1, 20, LONDON),
            fixture("B", 2, 20, LONDON),
            fixture("C", 3, 20, LONDON),
        ];
        let classes = classes_of(&matches, 10.0, 2);

        assert_eq!(classes.len(), 3);
        assert_eq!(classes.representatives().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn different_neighbours_are_not_grouped() {
        // B is within range of C, A is not
        let matches = vec![
            fixture("A", 1, 15, MUNICH),
            fixture("B", 1, 20, LONDON),
            fixture("C", 2, 20, FULHAM),
        ];
        let classes = classes_of(&matches, 10.0, 3);
        assert_eq!(classes.len(), 3);
    }

    #[test]
    fn from_groups_normalises() {
        let classes = EquivalenceClasses::from_groups(vec![vec![2, 1], vec![3, 4], vec![5]]);

        assert_eq!(classes.representatives().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(classes.members(1), &[1, 2]);
        assert_eq!(classes.representative_of(4), Some(3));
        assert!(classes.members(2).is_empty());
        assert_eq!(classes.representative_of(0), None);
    }

    #[test]
    fn empty_graph() {
        let classes = EquivalenceClasses::compute(&[], &[]);
        assert!(classes.is_empty());
    }
}
