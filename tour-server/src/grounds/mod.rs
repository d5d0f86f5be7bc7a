//! Home grounds of teams.
//!
//! Fixture listings often omit the venue. When they do, the match is
//! assumed to be played at the home team's registered ground, as reported
//! by the competition's team listing.

use std::collections::HashMap;

use crate::football::{Fixture, TeamDto};

/// Lookup from team name to the name of its home ground.
#[derive(Debug, Clone, Default)]
pub struct HomeGrounds {
    venues: HashMap<String, String>,
}

impl HomeGrounds {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `venue` as the home ground of `team`, replacing any earlier entry.
    pub fn add(&mut self, team: impl Into<String>, venue: impl Into<String>) {
        self.venues.insert(team.into(), venue.into());
    }

    /// Build from a team listing. Teams without a venue are skipped.
    pub fn from_teams<'a>(teams: impl IntoIterator<Item = &'a TeamDto>) -> Self {
        let mut grounds = Self::new();
        grounds.extend(teams);
        grounds
    }

    /// Add every team with a venue from a team listing.
    fn extend<'a>(&mut self, teams: impl IntoIterator<Item = &'a TeamDto>) {
        for team in teams {
            if let Some(venue) = team.venue.as_deref().map(str::trim)
                && !venue.is_empty()
            {
                self.add(team.name.clone(), venue);
            }
        }
    }

    /// The home ground of `team`, if known.
    pub fn venue_for(&self, team: &str) -> Option<&str> {
        self.venues.get(team).map(String::as_str)
    }

    /// The venue name to geocode for `fixture`.
    ///
    /// The fixture's own venue wins; otherwise the home team's ground.
    pub fn venue_query(&self, fixture: &Fixture) -> Option<String> {
        fixture
            .venue
            .clone()
            .or_else(|| self.venue_for(&fixture.home_team).map(str::to_string))
    }

    /// Number of teams with a known ground.
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Returns true if no grounds are known.
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}
