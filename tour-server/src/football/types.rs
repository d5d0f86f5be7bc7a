//! football-data.org v4 response types and competition codes.
//!
//! Only the fields the planner needs are deserialized.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::FootballError;

/// Competitions the planner knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Competition {
    ChampionsLeague,
    PremierLeague,
}

impl Competition {
    /// Every supported competition.
    pub const ALL: [Competition; 2] = [Competition::ChampionsLeague, Competition::PremierLeague];

    /// The provider's competition code.
    pub fn code(&self) -> &'static str {
        match self {
            Competition::ChampionsLeague => "CL",
            Competition::PremierLeague => "PL",
        }
    }
}

impl FromStr for Competition {
    type Err = FootballError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Competition::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| FootballError::UnknownCompetition(s.to_string()))
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Response of `/competitions/{code}/matches`.
#[derive(Debug, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<FixtureDto>,
}

/// A scheduled fixture.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureDto {
    /// Kickoff as an RFC 3339 timestamp, e.g. "2025-09-16T19:00:00Z"
    pub utc_date: String,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    /// Venue name, when the provider knows it
    #[serde(default)]
    pub venue: Option<String>,
}

/// Team as referenced from a fixture. Knockout slots not yet drawn have no name.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of `/competitions/{code}/teams`.
#[derive(Debug, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<TeamDto>,
}

/// A team with its registered home ground.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamDto {
    pub name: String,
    #[serde(default)]
    pub venue: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn competition_codes() {
        assert_eq!(Competition::ChampionsLeague.code(), "CL");
        assert_eq!(Competition::PremierLeague.to_string(), "PL");
    }

    #[test]
    fn parse_competition() {
        assert_eq!("CL".parse::<Competition>().unwrap(), Competition::ChampionsLeague);
        assert_eq!(" pl ".parse::<Competition>().unwrap(), Competition::PremierLeague);
        assert!(matches!(
            "XX".parse::<Competition>(),
            Err(FootballError::UnknownCompetition(code)) if code == "XX"
        ));
    }

    #[test]
    fn deserialize_matches() {
        let body = r#"{
            "filters": {"dateFrom": "2025-09-01", "dateTo": "2025-10-01"},
            "matches": [
                {
                    "utcDate": "2025-09-16T19:00:00Z",
                    "status": "TIMED",
                    "homeTeam": {"id": 5, "name": "FC Bayern München"},
                    "awayTeam": {"id": 61, "name": "Chelsea FC"},
                    "venue": "Allianz Arena"
                },
                {
                    "utcDate": "2025-09-17T16:45:00Z",
                    "homeTeam": {"id": null, "name": null},
                    "awayTeam": {"id": 4, "name": "Borussia Dortmund"}
                }
            ]
        }"#;

        let response: MatchesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.matches.len(), 2);

        let first = &response.matches[0];
        assert_eq!(first.utc_date, "2025-09-16T19:00:00Z");
        assert_eq!(first.home_team.name.as_deref(), Some("FC Bayern München"));
        assert_eq!(first.venue.as_deref(), Some("Allianz Arena"));

        let second = &response.matches[1];
        assert!(second.home_team.name.is_none());
        assert!(second.venue.is_none());
    }

    #[test]
    fn deserialize_teams() {
        let body = r#"{
            "count": 2,
            "teams": [
                {"id": 5, "name": "FC Bayern München", "venue": "Allianz Arena"},
                {"id": 99, "name": "Nomads FC", "venue": null}
            ]
        }"#;

        let response: TeamsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.teams.len(), 2);
        assert_eq!(response.teams[0].venue.as_deref(), Some("Allianz Arena"));
        assert!(response.teams[1].venue.is_none());
    }
}
