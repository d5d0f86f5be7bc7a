//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Match;
use crate::football::Competition;
use crate::planner::{Itinerary, TourConfig};

/// Home page with the search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub competitions: Vec<&'static str>,
    pub max_dist_km: f64,
    pub max_days: u32,
    pub min_games: usize,
}

impl IndexTemplate {
    /// Form pre-filled with the server's default thresholds.
    pub fn with_defaults(config: &TourConfig) -> Self {
        Self {
            competitions: Competition::ALL.iter().map(Competition::code).collect(),
            max_dist_km: config.max_dist_km,
            max_days: config.max_days,
            min_games: config.min_games,
        }
    }
}

/// Itinerary results fragment (no base.html).
#[derive(Template)]
#[template(path = "itineraries.html")]
pub struct ItinerariesTemplate {
    pub itineraries: Vec<ItineraryView>,
    pub matches_considered: usize,
    pub truncated: bool,
}

/// Itinerary view model for templates.
#[derive(Debug, Clone)]
pub struct ItineraryView {
    /// 1-based option number
    pub number: usize,
    pub matches: Vec<MatchView>,
}

impl ItineraryView {
    pub fn from_itinerary(number: usize, itinerary: &Itinerary) -> Self {
        Self {
            number,
            matches: itinerary.iter().map(MatchView::from_match).collect(),
        }
    }

    /// e.g. "2025-09-16 to 2025-09-19"
    pub fn date_range(&self) -> String {
        match (self.matches.first(), self.matches.last()) {
            (Some(first), Some(last)) if first.date != last.date => {
                format!("{} to {}", first.date, last.date)
            }
            (Some(first), _) => first.date.clone(),
            _ => String::new(),
        }
    }
}

/// Match view model for templates.
#[derive(Debug, Clone)]
pub struct MatchView {
    pub date: String,
    /// Kickoff time in UTC, HH:MM
    pub kickoff: String,
    pub home_team: String,
    pub away_team: String,
    pub location: String,
}

impl MatchView {
    pub fn from_match(m: &Match) -> Self {
        Self {
            date: m.date().format("%Y-%m-%d").to_string(),
            kickoff: m.kickoff().format("%H:%M").to_string(),
            home_team: m.home_team().to_string(),
            away_team: m.away_team().to_string(),
            location: m.location().to_string(),
        }
    }
}

/// Build view models for a list of itineraries, numbered from 1.
pub fn itinerary_views(itineraries: &[Itinerary]) -> Vec<ItineraryView> {
    itineraries
        .iter()
        .enumerate()
        .map(|(i, itinerary)| ItineraryView::from_itinerary(i + 1, itinerary))
        .collect()
}
