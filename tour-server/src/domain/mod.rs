//! Domain types for the fixture tour planner.
//!
//! A `Match` is a fully resolved fixture: its venue has already been
//! geocoded into a `Location`. Unresolved fixtures never reach this layer.

mod fixture;
mod location;

pub use fixture::{Match, days_between};
pub use location::{Location, haversine_distance};
