// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Venue proximity checks for clock-in/clock-out requests.
//!
//! The engine only needs "is this position within the allowed radius of
//! the venue"; anything fancier (geofence shapes, accuracy weighting)
//! belongs to the position provider, not here.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, for haversine distance.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS-84 coordinate pair.
///
/// A venue with both coordinates at zero is treated as "no venue position
/// declared" and skips proximity validation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new `GeoPoint`.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns whether this point carries no declared position.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// Great-circle distance between two points, in meters.
#[must_use]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a: f64 = a.latitude.to_radians();
    let lat_b: f64 = b.latitude.to_radians();
    let d_lat: f64 = (b.latitude - a.latitude).to_radians();
    let d_lon: f64 = (b.longitude - a.longitude).to_radians();

    let h: f64 = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// Returns whether `position` lies within `radius_meters` of `venue`.
#[must_use]
pub fn within_radius(venue: GeoPoint, position: GeoPoint, radius_meters: f64) -> bool {
    distance_meters(venue, position) <= radius_meters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_for_identical_points() {
        let p: GeoPoint = GeoPoint::new(40.7580, -73.9855);
        assert!(distance_meters(p, p) < f64::EPSILON);
    }

    #[test]
    fn test_known_distance_roughly_correct() {
        // Times Square to Bryant Park is about 500m.
        let a: GeoPoint = GeoPoint::new(40.7580, -73.9855);
        let b: GeoPoint = GeoPoint::new(40.7536, -73.9832);
        let d: f64 = distance_meters(a, b);
        assert!(d > 400.0 && d < 600.0, "got {d}");
    }

    #[test]
    fn test_within_radius_boundary() {
        let venue: GeoPoint = GeoPoint::new(40.7580, -73.9855);
        let near: GeoPoint = GeoPoint::new(40.7581, -73.9856);
        assert!(within_radius(venue, near, 150.0));
        assert!(!within_radius(venue, near, 1.0));
    }

    #[test]
    fn test_unset_detection() {
        assert!(GeoPoint::new(0.0, 0.0).is_unset());
        assert!(!GeoPoint::new(0.1, 0.0).is_unset());
    }
}
