//! Venue geocoding error types.

/// Errors that can occur while resolving a venue to coordinates.
#[derive(Debug, thiserror::Error)]
pub enum VenueError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A coordinate string could not be parsed
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = VenueError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(err.to_string(), "API error 429: slow down");

        let err = VenueError::InvalidCoordinate("north".to_string());
        assert_eq!(err.to_string(), "invalid coordinate: north");
    }
}
