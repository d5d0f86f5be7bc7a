//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedFootballClient;
use crate::collect::MatchCollector;
use crate::planner::TourConfig;
use crate::venues::NominatimClient;

/// The collector the server runs with.
pub type Collector = MatchCollector<CachedFootballClient, NominatimClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Fixture fetching and venue resolution
    pub collector: Arc<Collector>,

    /// Default search thresholds
    pub config: Arc<TourConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(collector: Collector, config: TourConfig) -> Self {
        Self {
            collector: Arc::new(collector),
            config: Arc::new(config),
        }
    }
}
