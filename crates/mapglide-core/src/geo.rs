//! Geographic coordinates and great-circle bearing.

use serde::{Deserialize, Serialize};

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true when both components are finite and within geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Initial great-circle bearing from `from` to `to`, in degrees within [0, 360).
///
/// Identical points yield 0.
pub fn bearing_between(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    if y == 0.0 && x == 0.0 {
        return 0.0;
    }

    normalize_bearing(y.atan2(x).to_degrees())
}

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_bearing(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed angular difference `to - from` along the shorter arc, in (-180, 180].
pub fn shortest_arc(from: f64, to: f64) -> f64 {
    let delta = normalize_bearing(to - from);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Wrap a longitude into [-180, 180).
pub fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_bearing_same_point_is_zero() {
        let a = Coordinate::new(38.910337, -77.04227);
        assert_eq!(bearing_between(a, a), 0.0);
    }

    #[test]
    fn test_bearing_due_north() {
        let a = Coordinate::new(10.0, 20.0);
        let b = Coordinate::new(11.0, 20.0);
        assert!(bearing_between(a, b).abs() < EPS);
    }

    #[test]
    fn test_bearing_due_east_on_equator() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        assert!((bearing_between(a, b) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_bearing_south_and_west() {
        let origin = Coordinate::new(0.0, 0.0);
        let south = bearing_between(origin, Coordinate::new(-1.0, 0.0));
        let west = bearing_between(origin, Coordinate::new(0.0, -1.0));
        assert!((south - 180.0).abs() < EPS);
        assert!((west - 270.0).abs() < EPS);
    }

    #[test]
    fn test_bearing_washington_to_new_york() {
        // Roughly north-east
        let dc = Coordinate::new(38.9072, -77.0369);
        let nyc = Coordinate::new(40.7128, -74.0060);
        let b = bearing_between(dc, nyc);
        assert!(b > 40.0 && b < 60.0, "unexpected bearing {b}");
    }

    #[test]
    fn test_normalize_bearing() {
        assert_eq!(normalize_bearing(0.0), 0.0);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert!((normalize_bearing(-90.0) - 270.0).abs() < EPS);
        assert!((normalize_bearing(725.0) - 5.0).abs() < EPS);
        assert_eq!(normalize_bearing(f64::NAN), 0.0);
        assert!(normalize_bearing(-1e-18) < 360.0);
    }

    #[test]
    fn test_shortest_arc() {
        assert!((shortest_arc(350.0, 10.0) - 20.0).abs() < EPS);
        assert!((shortest_arc(10.0, 350.0) + 20.0).abs() < EPS);
        assert!((shortest_arc(0.0, 180.0) - 180.0).abs() < EPS);
        assert_eq!(shortest_arc(42.0, 42.0), 0.0);
    }

    #[test]
    fn test_wrap_longitude() {
        assert!((wrap_longitude(190.0) + 170.0).abs() < EPS);
        assert!((wrap_longitude(-190.0) - 170.0).abs() < EPS);
        assert!((wrap_longitude(-77.0) + 77.0).abs() < EPS);
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::new(45.0, 120.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }
}
