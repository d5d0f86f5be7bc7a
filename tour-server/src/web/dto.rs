//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Match;
use crate::football::{Competition, FootballError};
use crate::planner::{Itinerary, TourConfig};

/// Query parameters of `GET /itineraries`.
#[derive(Debug, Default, Deserialize)]
pub struct ItineraryRequest {
    /// First day of the trip, YYYY-MM-DD
    pub from: String,

    /// Last day of the trip, YYYY-MM-DD
    pub to: String,

    /// Comma-separated competition codes (defaults to all)
    pub competitions: Option<String>,

    /// Maximum distance between consecutive venues, in km
    pub max_dist_km: Option<f64>,

    /// Span of one trip, in days
    pub max_days: Option<u32>,

    /// Minimum number of games per itinerary
    pub min_games: Option<usize>,
}

impl ItineraryRequest {
    /// The requested competitions, in request order.
    ///
    /// An absent or blank list means every supported competition.
    pub fn competitions(&self) -> Result<Vec<Competition>, FootballError> {
        let codes = self
            .competitions
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match codes {
            None => Ok(Competition::ALL.to_vec()),
            Some(codes) => codes.split(',').map(str::parse).collect(),
        }
    }

    /// Search thresholds, with `defaults` filling in whatever was not given.
    pub fn tour_config(&self, defaults: &TourConfig) -> TourConfig {
        TourConfig::new(
            self.max_dist_km.unwrap_or(defaults.max_dist_km),
            self.max_days.unwrap_or(defaults.max_days),
            self.min_games.unwrap_or(defaults.min_games),
        )
        .with_max_states(defaults.max_states)
    }
}

/// Response of `GET /itineraries`.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    /// Number of geolocated matches the search ran over
    pub matches_considered: usize,

    /// The search hit its state limit and the list may be incomplete
    pub truncated: bool,

    pub itineraries: Vec<ItineraryResult>,
}

/// One itinerary: matches in chronological order.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub matches: Vec<MatchResult>,
}

impl ItineraryResult {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            matches: itinerary.iter().map(MatchResult::from_match).collect(),
        }
    }
}

/// A match within an itinerary.
#[derive(Debug, Serialize)]
pub struct MatchResult {
    pub home_team: String,
    pub away_team: String,

    /// Kickoff as RFC 3339 (UTC)
    pub kickoff: String,

    /// Calendar date of the kickoff, YYYY-MM-DD
    pub date: String,

    pub latitude: f64,
    pub longitude: f64,
}

impl MatchResult {
    pub fn from_match(m: &Match) -> Self {
        Self {
            home_team: m.home_team().to_string(),
            away_team: m.away_team().to_string(),
            kickoff: m.kickoff().to_rfc3339(),
            date: m.date().format("%Y-%m-%d").to_string(),
            latitude: m.location().latitude,
            longitude: m.location().longitude,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
