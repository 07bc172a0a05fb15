//! Great-circle distance on a spherical Earth.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Haversine distance in meters between two points given in degrees.
///
/// Total over valid coordinates: zero for identical points, well defined for
/// antipodal ones. Input is not validated; non-finite or out-of-range degrees
/// give a meaningless (possibly NaN) result that callers must reject. Use
/// [`Coordinates::new`] to validate first.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 near the antipode.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Validated latitude/longitude pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Distance to `other` in meters.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(actual: f64, expected: f64, tolerance: f64) -> bool {
        ((actual - expected) / expected).abs() <= tolerance
    }

    #[test]
    fn identical_points_are_zero_apart() {
        assert_eq!(haversine_distance(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(haversine_distance(-6.2, 106.816666, -6.2, 106.816666), 0.0);
        assert_eq!(haversine_distance(90.0, 0.0, 90.0, 0.0), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let d = haversine_distance(0.0, 0.0, 0.0, 1.0);
        assert!(within(d, 111_195.0, 0.01), "got {d}");
    }

    #[test]
    fn london_to_paris() {
        let d = haversine_distance(51.5, -0.1, 48.85, 2.35);
        assert!(within(d, 343_000.0, 0.02), "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_a_circumference_apart() {
        let half = std::f64::consts::PI * EARTH_RADIUS_METERS;
        for (lat, lon) in [(0.0, 0.0), (45.0, 90.0), (-33.9, 18.4), (90.0, 0.0)] {
            let anti_lon = if lon > 0.0 { lon - 180.0 } else { lon + 180.0 };
            let d = haversine_distance(lat, lon, -lat, anti_lon);
            assert!(d.is_finite());
            assert!(within(d, half, 1e-6), "({lat},{lon}) -> {d}");
        }
    }

    #[test]
    fn constructor_rejects_out_of_range_and_non_finite_degrees() {
        assert_eq!(Coordinates::new(90.5, 0.0), Err(GeoError::LatitudeOutOfRange(90.5)));
        assert_eq!(Coordinates::new(0.0, -180.1), Err(GeoError::LongitudeOutOfRange(-180.1)));
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn coordinates() -> impl Strategy<Value = Coordinates> {
            (-90.0f64..=90.0, -180.0f64..=180.0)
                .prop_map(|(lat, lon)| Coordinates::new(lat, lon).unwrap())
        }

        proptest! {
            /// Property: distance from a point to itself is exactly zero.
            #[test]
            fn distance_to_self_is_zero(p in coordinates()) {
                prop_assert_eq!(p.distance_to(&p), 0.0);
            }

            /// Property: distance is symmetric.
            #[test]
            fn distance_is_symmetric(a in coordinates(), b in coordinates()) {
                let ab = a.distance_to(&b);
                let ba = b.distance_to(&a);
                prop_assert!((ab - ba).abs() <= 1e-6, "{} vs {}", ab, ba);
            }

            /// Property: distance is finite, non-negative and at most half a circumference.
            #[test]
            fn distance_is_bounded(a in coordinates(), b in coordinates()) {
                let d = a.distance_to(&b);
                prop_assert!(d.is_finite());
                prop_assert!(d >= 0.0);
                prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_METERS + 1e-6);
            }
        }
    }
}
