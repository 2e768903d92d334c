//! Station value type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A station on the line.
///
/// `order` is the station's position along the line and increases in one
/// physical direction. `minutes_to_next` is the travel time to the station
/// with the next-higher order; it is `None` (or zero) at the terminus.
///
/// Stations are plain values. Uniqueness of `order` is checked when a
/// [`StationTable`](crate::line::StationTable) is built, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Display name, or a localization key resolved by the presentation layer.
    pub name: String,
    pub order: i32,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub minutes_to_next: Option<u32>,
}

impl Station {
    /// Create a new station.
    pub fn new(
        name: impl Into<String>,
        order: i32,
        coordinate: Coordinate,
        minutes_to_next: Option<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            order,
            coordinate,
            minutes_to_next,
        }
    }

    /// Travel minutes to the next-higher station, zero at the terminus.
    pub fn minutes_to_next_or_zero(&self) -> u32 {
        self.minutes_to_next.unwrap_or(0)
    }

    /// Returns true if both values refer to the same position on the line.
    pub fn same_order(&self, other: &Station) -> bool {
        self.order == other.order
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kafd() -> Station {
        Station::new("station.kafd", 8, Coordinate::new(24.7671553, 46.6432711), None)
    }

    #[test]
    fn terminus_has_zero_minutes() {
        assert_eq!(kafd().minutes_to_next_or_zero(), 0);
        let mut s = kafd();
        s.minutes_to_next = Some(5);
        assert_eq!(s.minutes_to_next_or_zero(), 5);
    }

    #[test]
    fn same_order_ignores_name() {
        let mut other = kafd();
        other.name = "KAFD".to_string();
        assert!(kafd().same_order(&other));
        other.order = 7;
        assert!(!kafd().same_order(&other));
    }

    #[test]
    fn display() {
        assert_eq!(kafd().to_string(), "station.kafd (#8)");
    }

    #[test]
    fn minutes_to_next_may_be_omitted() {
        let json = r#"{
            "name": "station.kafd",
            "order": 8,
            "coordinate": {"latitude": 24.7671553, "longitude": 46.6432711}
        }"#;
        let s: Station = serde_json::from_str(json).unwrap();
        assert_eq!(s, kafd());
    }
}
