//! Geographic coordinates.

use std::fmt;

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// Used both for station locations and for raw position samples from the
/// location provider.
///
/// # Examples
///
/// ```
/// use metro_tracker::domain::Coordinate;
///
/// let kafd = Coordinate::new(24.7671553, 46.6432711);
/// assert_eq!(kafd.distance_m(&kafd), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        self.to_point().haversine_distance(&other.to_point())
    }

    /// Returns true if both components are finite numbers.
    ///
    /// A sample failing this carries no usable position.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Coordinate> for Point {
    fn from(c: Coordinate) -> Self {
        c.to_point()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
