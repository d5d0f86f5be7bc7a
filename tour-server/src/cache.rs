//! Caching layer for fixture provider responses.
//!
//! The football-data free tier allows only a handful of requests per
//! minute, and the same competition and date range is typically asked for
//! several times with different search thresholds. Fixture lists are
//! cached per (competition, from, to) and team lists per competition.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::football::{Competition, Fixture, FootballClient, FootballError, TeamDto};

/// Cache key for fixture lists.
type FixturesKey = (Competition, NaiveDate, NaiveDate);

/// Cached fixture list.
type FixturesEntry = Arc<Vec<Fixture>>;

/// Cached team list.
type TeamsEntry = Arc<Vec<TeamDto>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for fixture lists.
    pub fixtures_ttl: Duration,

    /// TTL for team lists. Grounds change rarely.
    pub teams_ttl: Duration,

    /// Maximum number of cached fixture lists.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            fixtures_ttl: Duration::from_secs(10 * 60),
            teams_ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 256,
        }
    }
}

/// In-memory cache for football-data responses.
pub struct FootballCache {
    fixtures: MokaCache<FixturesKey, FixturesEntry>,
    teams: MokaCache<Competition, TeamsEntry>,
}

impl FootballCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let fixtures = MokaCache::builder()
            .time_to_live(config.fixtures_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let teams = MokaCache::builder()
            .time_to_live(config.teams_ttl)
            .max_capacity(Competition::ALL.len() as u64)
            .build();

        Self { fixtures, teams }
    }

    pub async fn get_fixtures(&self, key: &FixturesKey) -> Option<FixturesEntry> {
        self.fixtures.get(key).await
    }

    pub async fn insert_fixtures(&self, key: FixturesKey, entry: FixturesEntry) {
        self.fixtures.insert(key, entry).await;
    }

    pub async fn get_teams(&self, competition: &Competition) -> Option<TeamsEntry> {
        self.teams.get(competition).await
    }

    pub async fn insert_teams(&self, competition: Competition, entry: TeamsEntry) {
        self.teams.insert(competition, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.fixtures.entry_count() + self.teams.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.fixtures.invalidate_all();
        self.teams.invalidate_all();
    }
}

/// football-data client with caching.
///
/// Wraps a `FootballClient`; errors are never cached.
pub struct CachedFootballClient {
    client: FootballClient,
    cache: FootballCache,
}

impl CachedFootballClient {
    /// Create a new cached client.
    pub fn new(client: FootballClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: FootballCache::new(cache_config),
        }
    }

    /// Fixtures of `competition` between `from` and `to`, using cache if available.
    pub async fn fixtures(
        &self,
        competition: Competition,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<FixturesEntry, FootballError> {
        let key = (competition, from, to);

        if let Some(cached) = self.cache.get_fixtures(&key).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.client.fixtures(competition, from, to).await?);
        self.cache.insert_fixtures(key, entry.clone()).await;

        Ok(entry)
    }

    /// Teams of `competition`, using cache if available.
    pub async fn teams(&self, competition: Competition) -> Result<TeamsEntry, FootballError> {
        if let Some(cached) = self.cache.get_teams(&competition).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.client.teams(competition).await?);
        self.cache.insert_teams(competition, entry.clone()).await;

        Ok(entry)
    }
}
