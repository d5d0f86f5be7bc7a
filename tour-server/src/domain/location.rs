//! Geographic coordinates and great-circle distance.

use std::fmt;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the globe, in degrees.
///
/// No range is enforced: values come from the geocoder and are trusted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Create a location from latitude and longitude in degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &Location) -> f64 {
        haversine_distance(self, other)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two locations in kilometers.
///
/// # Examples
///
/// ```
/// use tour_server::domain::{Location, haversine_distance};
///
/// let allianz = Location::new(48.2188, 11.6236);
/// let signal_iduna = Location::new(51.4925, 7.4517);
/// let km = haversine_distance(&allianz, &signal_iduna);
/// assert_eq!((km * 1000.0).round() / 1000.0, 470.965);
/// ```
pub fn haversine_distance(from: &Location, to: &Location) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lng = to.longitude.to_radians() - from.longitude.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just above 1 for near-antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round3(x: f64) -> f64 {
        (x * 1000.0).round() / 1000.0
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let pairs = [
            (Location::new(0.0, 0.0), Location::new(0.0, 180.0)),
            (Location::new(90.0, 0.0), Location::new(-90.0, 0.0)),
            (Location::new(51.4816869, -0.1910336), Location::new(-51.4816869, 179.8089664)),
            (Location::new(33.3, 44.4), Location::new(-33.3, -135.6)),
        ];
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;

        for (a, b) in pairs {
            let km = haversine_distance(&a, &b);
            assert!(!km.is_nan(), "{a} to {b} is NaN");
            assert!((km - half).abs() < 1e-3, "{a} to {b}: {km}");
        }
    }

    #[test]
    fn same_point_is_zero() {
        let loc = Location::new(51.4816869, -0.1910336);
        assert!(haversine_distance(&loc, &loc) < 1e-9);
    }

    #[test]
    fn munich_to_dortmund() {
        let allianz = Location::new(48.2188, 11.6236);
        let signal_iduna = Location::new(51.4925, 7.4517);
        assert_eq!(round3(haversine_distance(&allianz, &signal_iduna)), 470.965);
    }

    #[test]
    fn symmetric() {
        let a = Location::new(51.604157, -0.0662604);
        let b = Location::new(51.4749218, -0.2217448);
        assert_eq!(haversine_distance(&a, &b), haversine_distance(&b, &a));
        assert_eq!(a.distance_to(&b), haversine_distance(&a, &b));
    }

    #[test]
    fn london_grounds_are_close_but_not_adjacent() {
        let tottenham = Location::new(51.604157, -0.0662604);
        let stamford_bridge = Location::new(51.4816869, -0.1910336);
        let craven_cottage = Location::new(51.4749218, -0.2217448);

        let spurs_chelsea = haversine_distance(&tottenham, &stamford_bridge);
        assert!(spurs_chelsea > 10.0 && spurs_chelsea < 20.0, "got {spurs_chelsea}");

        let chelsea_fulham = haversine_distance(&stamford_bridge, &craven_cottage);
        assert!(chelsea_fulham < 3.0, "got {chelsea_fulham}");
    }

    #[test]
    fn display() {
        let loc = Location::new(48.2187901, 11.6236227);
        assert_eq!(loc.to_string(), "(48.2188, 11.6236)");
    }
}
