//! Itinerary planner over a fixed set of matches.
//!
//! This module answers: "which runs of at least N matches can I attend,
//! with each match at most D days after the previous ones and every venue
//! within K km of the last?"
//!
//! Matches are sorted by date and turned into a DAG of day-weighted edges.
//! Structurally identical matches are collapsed into equivalence classes,
//! a depth-first search with a sliding day window runs over one
//! representative per class, and the resulting paths are expanded back
//! into concrete itineraries.

mod config;
mod equivalence;
mod expand;
mod graph;
mod search;
mod sparse;
mod travel;

pub use config::{ConfigError, DEFAULT_MAX_STATES, MAX_DAYS_LIMIT, MAX_DIST_KM_LIMIT, TourConfig};
pub use equivalence::EquivalenceClasses;
pub use expand::expand_paths;
pub use graph::{NodeAdjacency, NodeId, build_graph};
pub use search::{PathSearch, SearchOutcome, remove_subsequences};
pub use sparse::SparseGraph;
pub use travel::{Itinerary, TourSearch, TravelGraph, format_itineraries};
