//! Venue geocoding.
//!
//! Turns venue names into coordinates through Nominatim, with a JSON file
//! cache so each venue is looked up at most once, and a throttle that keeps
//! outbound requests within the service's usage policy.

mod cache;
mod client;
mod error;
mod resolver;

pub use cache::{VenueCache, VenueCacheConfig};
pub use client::{NominatimClient, NominatimConfig, PlaceDto, parse_search_response};
pub use error::VenueError;
pub use resolver::{Geocoder, VenueResolver, VenueResolverConfig};
