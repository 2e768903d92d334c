//! Ordered station table and its spatial queries.

use std::path::Path;

use crate::domain::{Coordinate, Direction, Station};

use super::error::LineError;

/// Whether a range query includes its far end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndPolicy {
    Include,
    Exclude,
}

/// The stations of one line, sorted by ascending order.
///
/// Construction guarantees the table is non-empty and that no two stations
/// share an order, so queries such as [`nearest`](Self::nearest) always
/// have an answer.
#[derive(Debug, Clone)]
pub struct StationTable {
    stations: Vec<Station>,
}

impl StationTable {
    /// Build a table from stations in any order.
    ///
    /// Fails if the list is empty or two stations share an order.
    pub fn new(mut stations: Vec<Station>) -> Result<Self, LineError> {
        if stations.is_empty() {
            return Err(LineError::EmptyLine);
        }

        stations.sort_by_key(|s| s.order);

        if let Some(pair) = stations.windows(2).find(|w| w[0].order == w[1].order) {
            return Err(LineError::DuplicateOrder(pair[0].order));
        }

        Ok(Self { stations })
    }

    /// Parse a table from a JSON array of stations.
    pub fn from_json(json: &str) -> Result<Self, LineError> {
        let stations: Vec<Station> = serde_json::from_str(json)?;
        Self::new(stations)
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The station closest to `position` by great-circle distance.
    ///
    /// Ties go to the lowest order.
    pub fn nearest(&self, position: &Coordinate) -> &Station {
        self.nearest_with_distance(position).0
    }

    /// Like [`nearest`](Self::nearest), also returning the distance in meters.
    pub fn nearest_with_distance(&self, position: &Coordinate) -> (&Station, f64) {
        let mut best = &self.stations[0];
        let mut best_dist = best.coordinate.distance_m(position);

        // Strict comparison keeps the earliest (lowest-order) station on ties.
        for station in &self.stations[1..] {
            let dist = station.coordinate.distance_m(position);
            if dist < best_dist {
                best = station;
                best_dist = dist;
            }
        }

        (best, best_dist)
    }

    /// Returns true if any station lies within `radius_m` meters of `position`.
    pub fn is_within_range(&self, position: &Coordinate, radius_m: f64) -> bool {
        self.stations
            .iter()
            .any(|s| s.coordinate.distance_m(position) <= radius_m)
    }

    /// Look up a station by order.
    pub fn get(&self, order: i32) -> Option<&Station> {
        self.stations
            .binary_search_by_key(&order, |s| s.order)
            .ok()
            .map(|idx| &self.stations[idx])
    }

    /// The adjacent station after `order` in the given direction.
    ///
    /// Orders may be sparse, so this is the next station present in the
    /// table rather than `order ± 1`.
    pub fn neighbor(&self, order: i32, direction: Direction) -> Option<&Station> {
        let idx = self.stations.partition_point(|s| s.order <= order);
        match direction {
            Direction::Forward => self.stations.get(idx),
            Direction::Backward => {
                let below = self.stations.partition_point(|s| s.order < order);
                below.checked_sub(1).map(|i| &self.stations[i])
            }
            Direction::Undetermined => None,
        }
    }

    /// Stations strictly after `from_order` up to `to_order`, in travel order.
    ///
    /// `end` controls whether the station at `to_order` is included. The
    /// result is empty if `direction` is undetermined or `to_order` does not
    /// lie ahead of `from_order` in that direction.
    pub fn stations_between(
        &self,
        from_order: i32,
        to_order: i32,
        direction: Direction,
        end: EndPolicy,
    ) -> Vec<&Station> {
        if !direction.is_ahead(from_order, to_order) {
            return Vec::new();
        }

        let within = |order: i32| match end {
            EndPolicy::Include => !direction.is_ahead(to_order, order),
            EndPolicy::Exclude => direction.is_ahead(order, to_order),
        };

        let selected = self
            .stations
            .iter()
            .filter(|s| direction.is_ahead(from_order, s.order) && within(s.order));

        match direction {
            Direction::Backward => selected.rev().collect(),
            _ => selected.collect(),
        }
    }

    /// Scheduled travel minutes between two orders, in either direction.
    ///
    /// Each hop between adjacent stations costs the `minutes_to_next` of
    /// its lower-ordered station.
    pub fn minutes_between(&self, a: i32, b: i32) -> u32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.stations
            .iter()
            .filter(|s| s.order >= lo && s.order < hi)
            .map(Station::minutes_to_next_or_zero)
            .sum()
    }

    /// All stations in ascending order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Iterate stations in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// The lowest-ordered station.
    pub fn first(&self) -> &Station {
        &self.stations[0]
    }

    /// The highest-ordered station.
    pub fn last(&self) -> &Station {
        &self.stations[self.stations.len() - 1]
    }

    /// Number of stations on the line.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always false: a table cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
