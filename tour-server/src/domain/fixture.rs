//! A single fixture: two teams, a kickoff and a resolved venue location.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use super::Location;

/// A fixture as an atomic point event.
///
/// Only the calendar date of the kickoff matters for itinerary planning;
/// time of day is carried for display. Values are immutable once built.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tour_server::domain::{Location, Match};
///
/// let kickoff = Utc.with_ymd_and_hms(2025, 9, 1, 19, 0, 0).unwrap();
/// let m = Match::new("Bayern", "Chelsea", kickoff, Location::new(48.2188, 11.6236));
/// assert_eq!(m.to_string(), "Bayern vs Chelsea");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    home_team: String,
    away_team: String,
    kickoff: DateTime<Utc>,
    location: Location,
}

impl Match {
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        kickoff: DateTime<Utc>,
        location: Location,
    ) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            kickoff,
            location,
        }
    }

    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    /// Kickoff timestamp (UTC).
    pub fn kickoff(&self) -> DateTime<Utc> {
        self.kickoff
    }

    /// Calendar date of the kickoff, in UTC.
    pub fn date(&self) -> NaiveDate {
        self.kickoff.date_naive()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.home_team, self.away_team)
    }
}

/// Whole calendar days from `from` to `to`, ignoring time of day.
///
/// Negative when `to` is on an earlier date.
pub fn days_between(from: &Match, to: &Match) -> i64 {
    to.date().signed_duration_since(from.date()).num_days()
}
