//! Tour search configuration.

/// Largest accepted `max_days`. The search is exponential in the number of
/// connected matches inside one window, so the window has to stay short.
pub const MAX_DAYS_LIMIT: u32 = 14;

/// Largest accepted `max_dist_km`.
pub const MAX_DIST_KM_LIMIT: f64 = 500.0;

/// Default cap on candidates expanded by one search.
pub const DEFAULT_MAX_STATES: usize = 200_000;

/// A threshold outside the accepted range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_dist_km must be between 0 and 500, got {0}")]
    Distance(f64),

    #[error("max_days must be at most 14, got {0}")]
    Days(u32),
}

/// Thresholds for itinerary search.
#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig {
    /// Maximum distance between consecutive venues (km).
    /// An edge exists when the distance is exactly this value.
    pub max_dist_km: f64,

    /// Exclusive upper bound on the day gap between consecutive matches,
    /// and the size of the sliding day window.
    pub max_days: u32,

    /// Minimum number of matches an itinerary must contain.
    pub min_games: usize,

    /// Candidates a search may expand before it gives up.
    pub max_states: usize,
}

impl TourConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_dist_km: f64, max_days: u32, min_games: usize) -> Self {
        Self {
            max_dist_km,
            max_days,
            min_games,
            max_states: DEFAULT_MAX_STATES,
        }
    }

    /// Set the state limit.
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    /// Check the thresholds are within the accepted limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_DIST_KM_LIMIT).contains(&self.max_dist_km) {
            return Err(ConfigError::Distance(self.max_dist_km));
        }
        if self.max_days > MAX_DAYS_LIMIT {
            return Err(ConfigError::Days(self.max_days));
        }
        Ok(())
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self::new(50.0, 4, 2)
    }
}
