//! Expansion of representative paths back to concrete matches.

use std::collections::BTreeSet;

use itertools::Itertools;

use super::equivalence::EquivalenceClasses;
use super::graph::NodeId;

/// Substitute every combination of class members into each path.
///
/// Each position of a representative path is replaced by each member of
/// its class in turn; identical concrete paths from different
/// representative paths collapse into one.
pub fn expand_paths<'a>(
    paths: impl IntoIterator<Item = &'a Vec<NodeId>>,
    classes: &EquivalenceClasses,
) -> BTreeSet<Vec<NodeId>> {
    paths
        .into_iter()
        .flat_map(|path| {
            path.iter()
                .map(|&rep| classes.members(rep).iter().copied())
                .multi_cartesian_product()
        })
        .collect()
}
