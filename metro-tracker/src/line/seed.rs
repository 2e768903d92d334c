//! Built-in station seed data.

use crate::domain::{Coordinate, Station};

use super::error::LineError;
use super::table::StationTable;

/// Builder for station tables.
///
/// Provides a fluent API for declaring a line in code.
#[derive(Debug, Default)]
pub struct LineBuilder {
    stations: Vec<Station>,
}

impl LineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station.
    pub fn station(
        mut self,
        name: &str,
        order: i32,
        latitude: f64,
        longitude: f64,
        minutes_to_next: Option<u32>,
    ) -> Self {
        self.stations.push(Station::new(
            name,
            order,
            Coordinate::new(latitude, longitude),
            minutes_to_next,
        ));
        self
    }

    /// Build the table, validating orders.
    pub fn build(self) -> Result<StationTable, LineError> {
        StationTable::new(self.stations)
    }
}

/// The Riyadh Metro Yellow Line (Line 4), airport to KAFD.
///
/// Names are localization keys. Order 0 is King Khalid Airport T1/T2 and
/// order 8 is the King Abdullah Financial District terminus.
pub fn yellow_line() -> StationTable {
    LineBuilder::new()
        .station("station.airport_t1_2", 0, 24.9609970, 46.6989819, Some(3))
        .station("station.airport_t3_4", 1, 24.9560402, 46.7021429, Some(3))
        .station("station.airport_t5", 2, 24.9407856, 46.7102385, Some(11))
        .station("station.pnu2", 3, 24.8596218, 46.7045103, Some(3))
        .station("station.pnu1", 4, 24.8414744, 46.7174164, Some(6))
        .station("station.sabic", 5, 24.8070691, 46.7095294, Some(3))
        .station("station.uthman_bin_affan", 6, 24.8013955, 46.6961421, Some(4))
        .station("station.ar_rabi", 7, 24.7862360, 46.6601248, Some(5))
        .station("station.kafd", 8, 24.7671553, 46.6432711, None)
        .build()
        // Static data with distinct orders; covered by `yellow_line_is_valid`.
        .expect("yellow line seed has unique orders")
}
