//! Depth-first itinerary search with a sliding day window.
//!
//! The search walks the sparse representative graph from every true source
//! (a representative with no incoming edge in the full graph). A state is a
//! candidate itinerary, ascending by node index, plus the days left in the
//! window measured from its earliest member.
//!
//! When the next edge does not fit in the remaining budget the window
//! slides instead of stopping: the earliest member is dropped and the days
//! between the first two members are given back. An itinerary therefore
//! only has to fit within `max_days` from whichever match currently starts
//! it, not from the match it started with.
//!
//! Only maximal candidates are kept: a candidate that has at least
//! `min_games` members but extends into another such candidate is dropped.
//! Paths that are strict subsequences of other kept paths are removed at
//! the end.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace, warn};

use crate::domain::{Match, days_between};

use super::equivalence::EquivalenceClasses;
use super::graph::{NodeAdjacency, NodeId};
use super::sparse::SparseGraph;

/// Result of a representative path search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Maximal representative paths, each ascending by node index.
    pub paths: BTreeSet<Vec<NodeId>>,

    /// Number of distinct candidates expanded.
    pub states_explored: usize,

    /// True if the search stopped at its state limit. `paths` then holds
    /// only what was found before stopping.
    pub truncated: bool,
}

/// A candidate on the explicit DFS stack.
#[derive(Debug)]
struct Frame {
    candidate: Vec<NodeId>,
    days_left: i64,
    /// Index of the next sparse edge of the last member to try.
    next_edge: usize,
    success: bool,
    found_extension: bool,
    /// True if this candidate is its parent plus one node (not a slide).
    extends_parent: bool,
}

impl Frame {
    fn new(candidate: Vec<NodeId>, days_left: i64, min_games: usize, extends_parent: bool) -> Self {
        let success = candidate.len() >= min_games;
        Self {
            candidate,
            days_left,
            next_edge: 0,
            success,
            found_extension: false,
            extends_parent,
        }
    }

    /// Whether this candidate, or something extending it, qualified.
    fn outcome(&self) -> bool {
        self.success || self.found_extension
    }
}

/// A successor state produced from one edge.
struct Step {
    candidate: Vec<NodeId>,
    days_left: i64,
    extends: bool,
}

/// Path search over the representative graph.
pub struct PathSearch<'a> {
    matches: &'a [Match],
    graph: &'a [NodeAdjacency],
    sparse: &'a SparseGraph,
    classes: &'a EquivalenceClasses,
    max_days: u32,
    max_states: usize,
}

impl<'a> PathSearch<'a> {
    pub fn new(
        matches: &'a [Match],
        graph: &'a [NodeAdjacency],
        sparse: &'a SparseGraph,
        classes: &'a EquivalenceClasses,
        max_days: u32,
    ) -> Self {
        Self {
            matches,
            graph,
            sparse,
            classes,
            max_days,
            max_states: usize::MAX,
        }
    }

    /// Stop after expanding `max_states` candidates.
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Representatives with no incoming edges in the full graph.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.classes
            .representatives()
            .filter(|&rep| self.graph[rep].incoming.is_empty())
    }

    /// Days available to a single-match candidate.
    fn initial_budget(&self) -> i64 {
        i64::from(self.max_days.saturating_sub(1))
    }

    fn gap(&self, from: NodeId, to: NodeId) -> i64 {
        days_between(&self.matches[from], &self.matches[to])
    }

    /// Drop members from the front until the candidate fits the window.
    fn settle(&self, mut candidate: Vec<NodeId>, mut days_left: i64) -> (Vec<NodeId>, i64) {
        while days_left < 0 {
            debug_assert!(
                candidate.len() > 1,
                "single-match candidate {candidate:?} cannot exceed the window"
            );
            if candidate.len() < 2 {
                break;
            }
            days_left += self.gap(candidate[0], candidate[1]);
            candidate.remove(0);
        }
        (candidate, days_left)
    }

    /// Produce the successor state for the next untried edge of `frame`.
    fn advance(&self, frame: &mut Frame) -> Option<Step> {
        let last = *frame.candidate.last()?;
        let &(next, gap) = self.sparse.outgoing(last).get(frame.next_edge)?;
        frame.next_edge += 1;

        let (candidate, days_left, extends) = if gap <= frame.days_left {
            let mut extended = frame.candidate.clone();
            extended.push(next);
            (extended, frame.days_left - gap, true)
        } else {
            // Singletons always have room for any edge, so there are two members here
            let regained = self.gap(frame.candidate[0], frame.candidate[1]);
            let mut slid = frame.candidate[1..].to_vec();
            slid.push(next);
            (slid, frame.days_left - gap + regained, false)
        };

        let (candidate, days_left) = self.settle(candidate, days_left);
        Some(Step {
            candidate,
            days_left,
            extends,
        })
    }

    /// Find all maximal representative paths with at least `min_games` members.
    pub fn search(&self, min_games: usize) -> SearchOutcome {
        let budget = self.initial_budget();
        let mut paths = BTreeSet::new();
        let mut states_explored = 0;
        let mut truncated = false;

        // The budget of a candidate is determined by its first and last
        // members, so its outcome can be reused wherever it reappears.
        let mut memo: HashMap<Vec<NodeId>, bool> = HashMap::new();

        'roots: for root in self.roots() {
            if memo.contains_key([root].as_slice()) {
                continue;
            }
            if states_explored >= self.max_states {
                truncated = true;
                break;
            }
            trace!(root, "searching from root");

            states_explored += 1;
            let mut stack = vec![Frame::new(vec![root], budget, min_games, false)];

            while let Some(frame) = stack.last_mut() {
                if let Some(step) = self.advance(frame) {
                    if let Some(&outcome) = memo.get(&step.candidate) {
                        if step.extends && outcome {
                            frame.found_extension = true;
                        }
                        continue;
                    }
                    if states_explored >= self.max_states {
                        truncated = true;
                        break 'roots;
                    }
                    states_explored += 1;
                    stack.push(Frame::new(
                        step.candidate,
                        step.days_left,
                        min_games,
                        step.extends,
                    ));
                } else if let Some(done) = stack.pop() {
                    let outcome = done.outcome();
                    if done.success && !done.found_extension {
                        paths.insert(done.candidate.clone());
                    }
                    if done.extends_parent
                        && outcome
                        && let Some(parent) = stack.last_mut()
                    {
                        parent.found_extension = true;
                    }
                    memo.insert(done.candidate, outcome);
                }
            }
        }

        if truncated {
            warn!(
                max_states = self.max_states,
                found = paths.len(),
                "path search hit its state limit"
            );
        }

        let found = paths.len();
        let paths = remove_subsequences(paths);
        debug!(
            states_explored,
            found,
            kept = paths.len(),
            "path search complete"
        );

        SearchOutcome {
            paths,
            states_explored,
            truncated,
        }
    }
}

/// True if `short` is a strict subsequence of `long`.
fn is_strict_subsequence(short: &[NodeId], long: &[NodeId]) -> bool {
    if short.len() >= long.len() {
        return false;
    }
    let mut rest = long.iter();
    short.iter().all(|node| rest.any(|other| other == node))
}

/// Remove every path that is a strict subsequence of another path.
pub fn remove_subsequences(paths: BTreeSet<Vec<NodeId>>) -> BTreeSet<Vec<NodeId>> {
    let mut longest_first: Vec<Vec<NodeId>> = paths.into_iter().collect();
    longest_first.sort_by_key(|path| std::cmp::Reverse(path.len()));

    let mut kept: Vec<Vec<NodeId>> = Vec::with_capacity(longest_first.len());
    for path in longest_first {
        if !kept.iter().any(|longer| is_strict_subsequence(&path, longer)) {
            kept.push(path);
        }
    }

    kept.into_iter().collect()
}


#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
