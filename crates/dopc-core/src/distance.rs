//! # Distance
//!
//! Great-circle distance between the user and the venue.
//!
//! ## Haversine Formula
//! ```text
//! a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)
//! c = 2 · atan2(√a, √(1−a))
//! d = R · c            R = 6 371 000 m (mean Earth radius)
//! ```
//!
//! The Earth is treated as a sphere.

use crate::types::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance in meters, unrounded.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Distance between two coordinates, rounded to the nearest whole meter.
///
/// ## Example
/// ```rust
/// use dopc_core::distance::great_circle_distance_meters;
/// use dopc_core::types::Coordinate;
///
/// let venue = Coordinate::new(60.17094, 24.93087).unwrap();
/// assert_eq!(great_circle_distance_meters(venue, venue), 0);
/// ```
pub fn great_circle_distance_meters(from: Coordinate, to: Coordinate) -> u64 {
    let meters = haversine_meters(from.latitude, from.longitude, to.latitude, to.longitude);
    // Non-negative and at most half the circumference, so the cast is exact.
    meters.round() as u64
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).unwrap()
    }

    #[test]
    fn test_identical_points_are_zero() {
        let venue = coord(60.17094, 24.93087);
        assert_eq!(great_circle_distance_meters(venue, venue), 0);
        assert_eq!(haversine_meters(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_known_distances() {
        let venue = coord(60.17094, 24.93087);

        // 0.005° north ≈ 556 m
        assert_eq!(
            great_circle_distance_meters(venue, coord(60.17594, 24.93087)),
            556
        );
        // 0.01° north ≈ 1112 m
        assert_eq!(
            great_circle_distance_meters(venue, coord(60.18094, 24.93087)),
            1112
        );
        // 0.01° east at 60°N is about half of that
        assert_eq!(
            great_circle_distance_meters(venue, coord(60.17094, 24.94087)),
            553
        );
    }

    #[test]
    fn test_symmetric() {
        let a = coord(60.1699, 24.9384);
        let b = coord(59.4370, 24.7536);
        assert_eq!(
            great_circle_distance_meters(a, b),
            great_circle_distance_meters(b, a)
        );
        assert_eq!(great_circle_distance_meters(a, b), 82147);
    }

    #[test]
    fn test_antipodal_points() {
        // Half the circumference: π · R
        assert_eq!(
            great_circle_distance_meters(coord(0.0, 0.0), coord(0.0, 180.0)),
            20_015_087
        );
        assert_eq!(
            great_circle_distance_meters(coord(90.0, 0.0), coord(-90.0, 0.0)),
            20_015_087
        );
    }
}
