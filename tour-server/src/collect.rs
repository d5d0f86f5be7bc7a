//! Gathering geolocated matches for the planner.
//!
//! Fixtures and team listings are fetched for every requested competition
//! at once; venue lookups then run one at a time through the throttled
//! resolver.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::try_join_all;
use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::cache::CachedFootballClient;
use crate::domain::Match;
use crate::football::{Competition, Fixture, FootballError, TeamDto};
use crate::grounds::HomeGrounds;
use crate::venues::{Geocoder, VenueError, VenueResolver};

/// Errors that can occur while collecting matches.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("fixture provider: {0}")]
    Football(#[from] FootballError),

    #[error("venue lookup: {0}")]
    Venue(#[from] VenueError),
}

/// Source of fixtures and team listings.
pub trait FixtureSource {
    fn fixtures(
        &self,
        competition: Competition,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<Arc<Vec<Fixture>>, FootballError>> + Send;

    fn teams(
        &self,
        competition: Competition,
    ) -> impl Future<Output = Result<Arc<Vec<TeamDto>>, FootballError>> + Send;
}

impl FixtureSource for CachedFootballClient {
    async fn fixtures(
        &self,
        competition: Competition,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Arc<Vec<Fixture>>, FootballError> {
        CachedFootballClient::fixtures(self, competition, from, to).await
    }

    async fn teams(&self, competition: Competition) -> Result<Arc<Vec<TeamDto>>, FootballError> {
        CachedFootballClient::teams(self, competition).await
    }
}

/// Combines a fixture source with a venue resolver.
pub struct MatchCollector<S, G> {
    source: S,
    resolver: VenueResolver<G>,
}

impl<S: FixtureSource + Sync, G: Geocoder + Sync> MatchCollector<S, G> {
    pub fn new(source: S, resolver: VenueResolver<G>) -> Self {
        Self { source, resolver }
    }

    /// Matches of `competitions` between `from` and `to`, with coordinates.
    ///
    /// Fixtures whose venue is unknown or cannot be geocoded are dropped.
    /// Repeated competitions are fetched once.
    pub async fn collect(
        &self,
        competitions: &[Competition],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Match>, CollectError> {
        let fetches = competitions.iter().copied().unique().map(|competition| async move {
            let (fixtures, teams) = futures::try_join!(
                self.source.fixtures(competition, from, to),
                self.source.teams(competition)
            )?;
            debug!(%competition, fixtures = fixtures.len(), teams = teams.len(), "fetched competition");
            Ok::<_, FootballError>((fixtures, teams))
        });
        let listings = try_join_all(fetches).await?;

        let grounds = HomeGrounds::from_teams(listings.iter().flat_map(|(_, teams)| teams.iter()));
        debug!(grounds = grounds.len(), "known home grounds");

        let mut matches = Vec::new();
        let mut dropped = 0usize;
        for fixture in listings.iter().flat_map(|(fixtures, _)| fixtures.iter()) {
            match self.locate(fixture, &grounds).await? {
                Some(m) => matches.push(m),
                None => dropped += 1,
            }
        }

        info!(matches = matches.len(), dropped, "collected matches");
        Ok(matches)
    }

    async fn locate(
        &self,
        fixture: &Fixture,
        grounds: &HomeGrounds,
    ) -> Result<Option<Match>, VenueError> {
        let Some(query) = grounds.venue_query(fixture) else {
            warn!(home = %fixture.home_team, away = %fixture.away_team, "no venue for fixture");
            return Ok(None);
        };

        let Some(location) = self.resolver.resolve(&query).await? else {
            debug!(venue = %query, "dropping fixture with unresolved venue");
            return Ok(None);
        };

        Ok(Some(Match::new(
            fixture.home_team.clone(),
            fixture.away_team.clone(),
            fixture.kickoff,
            location,
        )))
    }
}
