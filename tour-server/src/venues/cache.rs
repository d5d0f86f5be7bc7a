//! Disk-based cache of geocoded venues.
//!
//! Stored as a JSON object mapping each venue query to `[lat, lon]`, with
//! keys sorted so the file diffs cleanly.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::Location;

use super::error::VenueError;

/// Configuration for the venue disk cache.
#[derive(Debug, Clone)]
pub struct VenueCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
}

impl VenueCacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for VenueCacheConfig {
    fn default() -> Self {
        Self::new("venues.json")
    }
}

/// Disk cache for venue coordinates.
#[derive(Debug, Clone)]
pub struct VenueCache {
    config: VenueCacheConfig,
}

impl VenueCache {
    pub fn new(config: VenueCacheConfig) -> Self {
        Self { config }
    }

    /// Load every cached venue.
    ///
    /// A missing file loads as empty. So does a corrupt one, with a warning;
    /// it is overwritten on the next save.
    pub fn load(&self) -> HashMap<String, Location> {
        let Ok(contents) = std::fs::read_to_string(&self.config.path) else {
            return HashMap::new();
        };

        match serde_json::from_str::<BTreeMap<String, [f64; 2]>>(&contents) {
            Ok(entries) => entries
                .into_iter()
                .map(|(query, [lat, lon])| (query, Location::new(lat, lon)))
                .collect(),
            Err(e) => {
                warn!(path = %self.config.path.display(), error = %e, "ignoring corrupt venue cache");
                HashMap::new()
            }
        }
    }

    /// Write `venues` to the cache file, replacing its contents.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, venues: &HashMap<String, Location>) -> Result<(), VenueError> {
        let sorted: BTreeMap<&str, [f64; 2]> = venues
            .iter()
            .map(|(query, loc)| (query.as_str(), [loc.latitude, loc.longitude]))
            .collect();

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| VenueError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(&sorted).map_err(|e| VenueError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| VenueError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        Ok(())
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
