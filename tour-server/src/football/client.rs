//! football-data.org HTTP client.

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use super::convert::{Fixture, convert_fixtures};
use super::error::FootballError;
use super::types::{Competition, MatchesResponse, TeamDto, TeamsResponse};

/// Default base URL for the football-data API.
const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";

/// Date format for the `dateFrom` / `dateTo` query parameters.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Configuration for the football-data client.
#[derive(Debug, Clone)]
pub struct FootballConfig {
    /// API key for X-Auth-Token header authentication
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FootballConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the football-data.org API.
#[derive(Debug, Clone)]
pub struct FootballClient {
    http: reqwest::Client,
    base_url: String,
}

impl FootballClient {
    /// Create a new client.
    pub fn new(config: FootballConfig) -> Result<Self, FootballError> {
        let mut headers = HeaderMap::new();

        let token = HeaderValue::from_str(&config.api_key).map_err(|_| FootballError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-auth-token"), token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fixtures of `competition` between `from` and `to` inclusive.
    ///
    /// Fixtures that cannot be converted (e.g. undrawn knockout slots) are
    /// skipped.
    pub async fn fixtures(
        &self,
        competition: Competition,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Fixture>, FootballError> {
        let url = format!("{}/competitions/{}/matches", self.base_url, competition.code());
        let query = [
            ("dateFrom", from.format(DATE_FORMAT).to_string()),
            ("dateTo", to.format(DATE_FORMAT).to_string()),
        ];

        let response: MatchesResponse = self.get_json(&url, &query).await?;
        Ok(convert_fixtures(&response.matches))
    }

    /// Teams registered in `competition`, for the current season.
    pub async fn teams(&self, competition: Competition) -> Result<Vec<TeamDto>, FootballError> {
        let url = format!("{}/competitions/{}/teams", self.base_url, competition.code());

        let response: TeamsResponse = self.get_json(&url, &[]).await?;
        Ok(response.teams)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FootballError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FootballError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FootballError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FootballError::Json {
            message: e.to_string(),
        })
    }
}
