//! Fixture provider error types.

/// Errors that can occur when interacting with the football-data API.
#[derive(Debug, thiserror::Error)]
pub enum FootballError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check FOOTBALL_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Unknown competition code
    #[error("unknown competition code: {0}")]
    UnknownCompetition(String),
}
