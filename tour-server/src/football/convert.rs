//! Conversion from fixture DTOs to `Fixture` values.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::types::FixtureDto;

/// Error during DTO conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse the kickoff timestamp
    #[error("invalid kickoff time: {0}")]
    InvalidTime(String),

    /// A team has not been decided yet
    #[error("missing team name: {0}")]
    MissingTeam(&'static str),
}

/// A fixture whose venue has not been resolved to coordinates yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
    pub venue: Option<String>,
}

/// Convert a single fixture.
pub fn convert_fixture(dto: &FixtureDto) -> Result<Fixture, ConversionError> {
    let kickoff = DateTime::parse_from_rfc3339(&dto.utc_date)
        .map_err(|_| ConversionError::InvalidTime(dto.utc_date.clone()))?
        .with_timezone(&Utc);

    let home_team = dto
        .home_team
        .name
        .clone()
        .ok_or(ConversionError::MissingTeam("home"))?;
    let away_team = dto
        .away_team
        .name
        .clone()
        .ok_or(ConversionError::MissingTeam("away"))?;

    let venue = dto
        .venue
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    Ok(Fixture {
        home_team,
        away_team,
        kickoff,
        venue,
    })
}

/// Convert a list of fixtures, skipping the ones that cannot be converted.
pub fn convert_fixtures(dtos: &[FixtureDto]) -> Vec<Fixture> {
    dtos.iter()
        .filter_map(|dto| match convert_fixture(dto) {
            Ok(fixture) => Some(fixture),
            Err(e @ ConversionError::MissingTeam(_)) => {
                debug!(utc_date = %dto.utc_date, error = %e, "skipping undecided fixture");
                None
            }
            Err(e) => {
                warn!(utc_date = %dto.utc_date, error = %e, "skipping fixture");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::football::types::TeamRef;
    use chrono::TimeZone;

    fn dto(utc_date: &str, home: Option<&str>, away: Option<&str>, venue: Option<&str>) -> FixtureDto {
        FixtureDto {
            utc_date: utc_date.to_string(),
            home_team: TeamRef {
                name: home.map(String::from),
            },
            away_team: TeamRef {
                name: away.map(String::from),
            },
            venue: venue.map(String::from),
        }
    }

    #[test]
    fn converts_complete_fixture() {
        let fixture = convert_fixture(&dto(
            "2025-09-16T19:00:00Z",
            Some("FC Bayern München"),
            Some("Chelsea FC"),
            Some("Allianz Arena"),
        ))
        .unwrap();

        assert_eq!(fixture.home_team, "FC Bayern München");
        assert_eq!(fixture.away_team, "Chelsea FC");
        assert_eq!(
            fixture.kickoff,
            Utc.with_ymd_and_hms(2025, 9, 16, 19, 0, 0).unwrap()
        );
        assert_eq!(fixture.venue.as_deref(), Some("Allianz Arena"));
    }

    #[test]
    fn offset_timestamps_are_normalised_to_utc() {
        let fixture = convert_fixture(&dto(
            "2025-09-16T21:00:00+02:00",
            Some("A"),
            Some("B"),
            None,
        ))
        .unwrap();
        assert_eq!(
            fixture.kickoff,
            Utc.with_ymd_and_hms(2025, 9, 16, 19, 0, 0).unwrap()
        );
    }

    #[test]
    fn blank_venue_is_none() {
        let fixture =
            convert_fixture(&dto("2025-09-16T19:00:00Z", Some("A"), Some("B"), Some("  "))).unwrap();
        assert!(fixture.venue.is_none());
    }

    #[test]
    fn rejects_bad_time() {
        let err = convert_fixture(&dto("16/09/2025", Some("A"), Some("B"), None)).unwrap_err();
        assert_eq!(err, ConversionError::InvalidTime("16/09/2025".to_string()));
    }

    #[test]
    fn rejects_undecided_team() {
        let err = convert_fixture(&dto("2025-09-16T19:00:00Z", None, Some("B"), None)).unwrap_err();
        assert_eq!(err, ConversionError::MissingTeam("home"));
    }

    #[test]
    fn convert_fixtures_skips_invalid() {
        let dtos = vec![
            dto("2025-09-16T19:00:00Z", Some("A"), Some("B"), None),
            dto("2025-09-16T19:00:00Z", Some("C"), None, None),
            dto("not a time", Some("E"), Some("F"), None),
            dto("2025-09-17T19:00:00Z", Some("G"), Some("H"), None),
        ];

        let fixtures = convert_fixtures(&dtos);
        let homes: Vec<&str> = fixtures.iter().map(|f| f.home_team.as_str()).collect();
        assert_eq!(homes, vec!["A", "G"]);
    }
}
