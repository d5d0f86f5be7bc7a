//! Nominatim (OpenStreetMap) geocoding client.

use serde::Deserialize;

use crate::domain::Location;

use super::error::VenueError;

/// Default search endpoint.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim rejects requests without an identifying user agent.
const DEFAULT_USER_AGENT: &str = "tour-server";

/// A single search hit. Coordinates are returned as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDto {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl PlaceDto {
    /// Parse the coordinates of this hit.
    pub fn location(&self) -> Result<Location, VenueError> {
        let latitude = parse_coordinate(&self.lat)?;
        let longitude = parse_coordinate(&self.lon)?;
        Ok(Location::new(latitude, longitude))
    }
}

fn parse_coordinate(s: &str) -> Result<f64, VenueError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| VenueError::InvalidCoordinate(s.to_string()))
}

/// Parse a search response body, returning the first hit's location.
pub fn parse_search_response(body: &str) -> Result<Option<Location>, VenueError> {
    let places: Vec<PlaceDto> = serde_json::from_str(body).map_err(|e| VenueError::Json {
        message: e.to_string(),
    })?;

    places.first().map(PlaceDto::location).transpose()
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Search endpoint URL
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Client for the Nominatim search API.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new client.
    pub fn new(config: NominatimConfig) -> Result<Self, VenueError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Look up `query`, returning the best match or `None` if nothing was found.
    pub async fn geocode(&self, query: &str) -> Result<Option<Location>, VenueError> {
        let params = [("q", query), ("format", "json"), ("limit", "1")];

        let response = self.http.get(&self.base_url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VenueError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_search_response(&body)
    }
}
