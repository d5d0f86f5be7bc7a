//! The travel graph: matches, adjacency and equivalence classes.

use std::fmt::Write as _;

use tracing::debug;

use crate::domain::Match;

use super::config::{DEFAULT_MAX_STATES, TourConfig};
use super::equivalence::EquivalenceClasses;
use super::expand::expand_paths;
use super::graph::{NodeAdjacency, build_graph};
use super::search::PathSearch;
use super::sparse::SparseGraph;

/// An itinerary: matches in chronological order.
pub type Itinerary = Vec<Match>;

/// Itineraries of one search, with how much work it took.
#[derive(Debug, Clone, Default)]
pub struct TourSearch {
    pub itineraries: Vec<Itinerary>,
    pub states_explored: usize,
    /// The search stopped at its state limit; `itineraries` may be incomplete.
    pub truncated: bool,
}

/// Immutable graph over a fixed set of matches.
///
/// Built once; `find_paths` may be called any number of times (and from
/// several threads) with different minimum lengths.
#[derive(Debug, Clone)]
pub struct TravelGraph {
    matches: Vec<Match>,
    max_days: u32,
    max_states: usize,
    graph: Vec<NodeAdjacency>,
    classes: EquivalenceClasses,
}

impl TravelGraph {
    /// Sort `matches` by kickoff and build the adjacency and equivalence
    /// classes. Matches with equal kickoffs keep their input order.
    pub fn new(mut matches: Vec<Match>, max_dist_km: f64, max_days: u32) -> Self {
        matches.sort_by_key(Match::kickoff);
        let graph = build_graph(&matches, max_dist_km, max_days);
        let classes = EquivalenceClasses::compute(&matches, &graph);

        debug!(
            matches = matches.len(),
            edges = graph.iter().map(|n| n.outgoing.len()).sum::<usize>(),
            classes = classes.len(),
            "built travel graph"
        );

        Self {
            matches,
            max_days,
            max_states: DEFAULT_MAX_STATES,
            graph,
            classes,
        }
    }

    /// Build using the distance, day and state thresholds of `config`.
    pub fn from_config(matches: Vec<Match>, config: &TourConfig) -> Self {
        Self::new(matches, config.max_dist_km, config.max_days).with_max_states(config.max_states)
    }

    /// Limit the candidates one search may expand.
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Matches in node order (ascending by date).
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    /// Adjacency, indexed by node.
    pub fn graph(&self) -> &[NodeAdjacency] {
        &self.graph
    }

    pub fn classes(&self) -> &EquivalenceClasses {
        &self.classes
    }

    /// All maximal itineraries of at least `min_games` matches, ordered by
    /// the date of their first match.
    pub fn find_paths(&self, min_games: usize) -> Vec<Itinerary> {
        self.search(min_games).itineraries
    }

    /// Like `find_paths`, also reporting the work done and whether the
    /// state limit cut the search short.
    pub fn search(&self, min_games: usize) -> TourSearch {
        let sparse = SparseGraph::reduce(&self.graph, &self.classes);
        debug!(
            classes = sparse.len(),
            edges = sparse.edge_count(),
            "reduced to representatives"
        );

        let search = PathSearch::new(
            &self.matches,
            &self.graph,
            &sparse,
            &self.classes,
            self.max_days,
        )
        .with_max_states(self.max_states);
        let outcome = search.search(min_games);
        let concrete = expand_paths(&outcome.paths, &self.classes);

        let mut itineraries: Vec<Itinerary> = concrete
            .into_iter()
            .map(|path| path.into_iter().map(|i| self.matches[i].clone()).collect())
            .collect();
        itineraries.sort_by_key(|itinerary: &Itinerary| itinerary.first().map(Match::date));

        debug!(
            min_games,
            representative_paths = outcome.paths.len(),
            itineraries = itineraries.len(),
            "found itineraries"
        );

        TourSearch {
            itineraries,
            states_explored: outcome.states_explored,
            truncated: outcome.truncated,
        }
    }
}

/// Render itineraries as numbered options, one dated line per match.
pub fn format_itineraries(itineraries: &[Itinerary]) -> String {
    let mut out = String::new();
    for (n, itinerary) in itineraries.iter().enumerate() {
        let _ = writeln!(out, "Option {}:", n + 1);
        for m in itinerary {
            let _ = writeln!(out, "  {}: [{}]", m.date().format("%Y-%m-%d"), m);
        }
    }
    out
}
