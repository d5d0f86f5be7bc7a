//! Throttled, cached venue resolution.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::domain::Location;

use super::cache::VenueCache;
use super::client::NominatimClient;
use super::error::VenueError;

/// Something that turns a free-text venue query into coordinates.
pub trait Geocoder {
    /// Look up `query`. `Ok(None)` means the service found nothing.
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<Location>, VenueError>> + Send;
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Option<Location>, VenueError> {
        NominatimClient::geocode(self, query).await
    }
}

/// Configuration for the resolver.
#[derive(Debug, Clone)]
pub struct VenueResolverConfig {
    /// Minimum time between two outbound geocoding requests.
    pub min_interval: Duration,
}

impl Default for VenueResolverConfig {
    fn default() -> Self {
        // Nominatim's usage policy: at most one request per second.
        Self {
            min_interval: Duration::from_secs(1),
        }
    }
}

/// Resolves venue queries, consulting the disk cache before the geocoder.
///
/// Successful lookups are persisted immediately. Queries the geocoder
/// could not place are not remembered, so they are retried next time.
pub struct VenueResolver<G> {
    geocoder: G,
    cache: VenueCache,
    entries: Mutex<HashMap<String, Location>>,
    /// Held for the whole outbound request, so lookups are serialised.
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl<G: Geocoder> VenueResolver<G> {
    /// Create a resolver, loading whatever the disk cache already holds.
    pub fn new(geocoder: G, cache: VenueCache, config: VenueResolverConfig) -> Self {
        let entries = cache.load();
        debug!(venues = entries.len(), path = %cache.path().display(), "loaded venue cache");

        Self {
            geocoder,
            cache,
            entries: Mutex::new(entries),
            last_request: Mutex::new(None),
            min_interval: config.min_interval,
        }
    }

    /// Coordinates of `query`, or `None` if the geocoder has no answer.
    pub async fn resolve(&self, query: &str) -> Result<Option<Location>, VenueError> {
        if let Some(location) = self.cached(query).await {
            trace!(query, "venue cache hit");
            return Ok(Some(location));
        }

        let mut last_request = self.last_request.lock().await;

        // Another caller may have resolved it while we waited for the lock.
        if let Some(location) = self.cached(query).await {
            return Ok(Some(location));
        }

        if let Some(previous) = *last_request {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }

        debug!(query, "geocoding venue");
        let result = self.geocoder.geocode(query).await;
        *last_request = Some(Instant::now());

        let Some(location) = result? else {
            warn!(query, "no geocoding result for venue");
            return Ok(None);
        };

        let mut entries = self.entries.lock().await;
        entries.insert(query.to_string(), location);
        if let Err(e) = self.cache.save(&entries) {
            warn!(error = %e, "failed to persist venue cache");
        }

        Ok(Some(location))
    }

    /// Number of venues with known coordinates.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    async fn cached(&self, query: &str) -> Option<Location> {
        self.entries.lock().await.get(query).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venues::VenueCacheConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::{TempDir, tempdir};

    /// Geocoder answering from a fixed table and counting calls.
    struct MockGeocoder {
        answers: HashMap<String, Location>,
        calls: AtomicUsize,
    }

    impl MockGeocoder {
        fn new(answers: &[(&str, Location)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(q, loc)| (q.to_string(), *loc))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Geocoder for MockGeocoder {
        async fn geocode(&self, query: &str) -> Result<Option<Location>, VenueError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answers.get(query).copied())
        }
    }

    struct FailingGeocoder;

    impl Geocoder for FailingGeocoder {
        async fn geocode(&self, _query: &str) -> Result<Option<Location>, VenueError> {
            Err(VenueError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    const ARENA: Location = Location::new(48.2188, 11.6247);
    const BRIDGE: Location = Location::new(51.4817, -0.191);

    fn resolver_in<G: Geocoder>(dir: &TempDir, geocoder: G, interval_ms: u64) -> VenueResolver<G> {
        let cache = VenueCache::new(VenueCacheConfig::new(dir.path().join("venues.json")));
        let config = VenueResolverConfig {
            min_interval: Duration::from_millis(interval_ms),
        };
        VenueResolver::new(geocoder, cache, config)
    }

    #[test]
    fn default_interval_is_one_second() {
        assert_eq!(
            VenueResolverConfig::default().min_interval,
            Duration::from_secs(1)
        );
    }

    #[tokio::test]
    async fn miss_then_hit() {
        let dir = tempdir().unwrap();
        let resolver = resolver_in(&dir, MockGeocoder::new(&[("Allianz Arena", ARENA)]), 0);

        assert_eq!(resolver.resolve("Allianz Arena").await.unwrap(), Some(ARENA));
        assert_eq!(resolver.resolve("Allianz Arena").await.unwrap(), Some(ARENA));
        assert_eq!(resolver.geocoder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.len().await, 1);
    }

    #[tokio::test]
    async fn unresolved_queries_are_not_cached() {
        let dir = tempdir().unwrap();
        let resolver = resolver_in(&dir, MockGeocoder::new(&[]), 0);

        assert!(resolver.resolve("Nowhere Park").await.unwrap().is_none());
        assert!(resolver.resolve("Nowhere Park").await.unwrap().is_none());
        assert_eq!(resolver.geocoder.calls.load(Ordering::SeqCst), 2);
        assert!(resolver.is_empty().await);
    }

    #[tokio::test]
    async fn successful_lookups_are_persisted() {
        let dir = tempdir().unwrap();
        {
            let resolver = resolver_in(&dir, MockGeocoder::new(&[("Stamford Bridge", BRIDGE)]), 0);
            resolver.resolve("Stamford Bridge").await.unwrap();
        }

        // A fresh resolver answers from disk without calling the geocoder.
        let resolver = resolver_in(&dir, MockGeocoder::new(&[]), 0);
        assert_eq!(resolver.resolve("Stamford Bridge").await.unwrap(), Some(BRIDGE));
        assert_eq!(resolver.geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn outbound_requests_are_spaced() {
        let dir = tempdir().unwrap();
        let geocoder = MockGeocoder::new(&[("Allianz Arena", ARENA), ("Stamford Bridge", BRIDGE)]);
        let resolver = resolver_in(&dir, geocoder, 50);

        let start = Instant::now();
        resolver.resolve("Allianz Arena").await.unwrap();
        resolver.resolve("Stamford Bridge").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));

        // Hits are never throttled.
        let start = Instant::now();
        resolver.resolve("Allianz Arena").await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn geocoder_errors_propagate() {
        let dir = tempdir().unwrap();
        let resolver = resolver_in(&dir, FailingGeocoder, 0);

        assert!(matches!(
            resolver.resolve("Allianz Arena").await,
            Err(VenueError::Api { status: 503, .. })
        ));
        assert!(resolver.is_empty().await);
    }
}
