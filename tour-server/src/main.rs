use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tour_server::cache::{CacheConfig, CachedFootballClient};
use tour_server::collect::MatchCollector;
use tour_server::football::{FootballClient, FootballConfig};
use tour_server::planner::TourConfig;
use tour_server::venues::{
    NominatimClient, NominatimConfig, VenueCache, VenueCacheConfig, VenueResolver,
    VenueResolverConfig,
};
use tour_server::web::{AppState, create_router};

/// Directory of stylesheet assets, relative to the crate root.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tour_server=info")),
        )
        .init();

    let api_key = std::env::var("FOOTBALL_API_KEY").unwrap_or_else(|_| {
        warn!("FOOTBALL_API_KEY not set. Fixture requests will fail.");
        String::new()
    });

    // Create cached fixture client
    let football = FootballClient::new(FootballConfig::new(api_key))?;
    let football = CachedFootballClient::new(football, &CacheConfig::default());

    // Create venue resolver backed by the on-disk cache
    let venue_cache_config = match std::env::var("VENUE_CACHE_PATH") {
        Ok(path) => VenueCacheConfig::new(path),
        Err(_) => VenueCacheConfig::default(),
    };
    let geocoder = NominatimClient::new(NominatimConfig::default())?;
    let resolver = VenueResolver::new(
        geocoder,
        VenueCache::new(venue_cache_config),
        VenueResolverConfig::default(),
    );
    info!(venues = resolver.len().await, "venue cache ready");

    let state = AppState::new(MatchCollector::new(football, resolver), TourConfig::default());
    let app = create_router(state, STATIC_DIR);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Football Tour Planner listening on http://{addr}");
    info!("  GET  /health       - Health check");
    info!("  GET  /itineraries  - Find itineraries (from, to, competitions, max_dist_km, max_days, min_games)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
