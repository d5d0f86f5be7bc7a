//! football-data.org fixture provider.
//!
//! Fetches fixtures for a competition and date range, and the teams of a
//! competition with their registered grounds. Requests authenticate with
//! the `X-Auth-Token` header.

mod client;
mod convert;
mod error;
mod types;

pub use client::{FootballClient, FootballConfig};
pub use convert::{ConversionError, Fixture, convert_fixture, convert_fixtures};
pub use error::FootballError;
pub use types::{Competition, FixtureDto, TeamDto, TeamRef};
