//! Remaining-stations and ETA computation.

use crate::domain::{Direction, Station};
use crate::line::{EndPolicy, StationTable};

/// Progress from a station toward the destination.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Progress {
    /// Stations still to pass through, counting the destination.
    pub stations_remaining: u32,
    /// Scheduled minutes to the destination.
    pub eta_minutes: u32,
    /// The station one step toward the destination.
    pub next: Option<Station>,
}

/// Compute progress from `current` to `destination`.
///
/// With no direction yet, only the order difference is known: the ETA is
/// zero and there is no next station. A current station at or past the
/// destination has nothing remaining.
pub fn remaining(
    table: &StationTable,
    current: &Station,
    destination: &Station,
    direction: Direction,
) -> Progress {
    if !direction.is_determined() {
        return Progress {
            stations_remaining: destination.order.abs_diff(current.order),
            eta_minutes: 0,
            next: None,
        };
    }

    if !direction.is_ahead(current.order, destination.order) {
        return Progress::default();
    }

    let hops = table
        .stations_between(current.order, destination.order, direction, EndPolicy::Include)
        .len();

    Progress {
        stations_remaining: u32::try_from(hops).unwrap_or(u32::MAX),
        eta_minutes: table.minutes_between(current.order, destination.order),
        next: table.neighbor(current.order, direction).cloned(),
    }
}

/// Stations strictly beyond `current` up to and including `destination`,
/// in travel order.
pub fn upcoming(
    table: &StationTable,
    current: &Station,
    destination: &Station,
    direction: Direction,
) -> Vec<Station> {
    table
        .stations_between(current.order, destination.order, direction, EndPolicy::Include)
        .into_iter()
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    /// Nine stations with minutes to next [3, 3, 11, 6, 3, 4, 5, 5, -].
    fn line() -> StationTable {
        let minutes = [3, 3, 11, 6, 3, 4, 5, 5];
        let stations = (0..9)
            .map(|order| {
                Station::new(
                    format!("S{order}"),
                    order,
                    Coordinate::new(24.70 + 0.01 * order as f64, 46.70),
                    minutes.get(order as usize).copied(),
                )
            })
            .collect();
        StationTable::new(stations).unwrap()
    }

    fn at(table: &StationTable, order: i32) -> Station {
        table.get(order).unwrap().clone()
    }

    #[test]
    fn forward_one_to_four() {
        let t = line();
        let p = remaining(&t, &at(&t, 1), &at(&t, 4), Direction::Forward);
        assert_eq!(p.stations_remaining, 3);
        assert_eq!(p.eta_minutes, 3 + 11 + 6);
        assert_eq!(p.next.map(|s| s.order), Some(2));
    }

    #[test]
    fn backward_four_to_one_uses_same_segments() {
        let t = line();
        let p = remaining(&t, &at(&t, 4), &at(&t, 1), Direction::Backward);
        assert_eq!(p.stations_remaining, 3);
        assert_eq!(p.eta_minutes, 3 + 11 + 6);
        assert_eq!(p.next.map(|s| s.order), Some(3));
    }

    #[test]
    fn whole_line() {
        let t = line();
        let p = remaining(&t, &at(&t, 0), &at(&t, 8), Direction::Forward);
        assert_eq!(p.stations_remaining, 8);
        assert_eq!(p.eta_minutes, 40);
    }

    #[test]
    fn at_or_past_destination() {
        let t = line();
        assert_eq!(
            remaining(&t, &at(&t, 4), &at(&t, 4), Direction::Forward),
            Progress::default()
        );
        assert_eq!(
            remaining(&t, &at(&t, 5), &at(&t, 4), Direction::Forward),
            Progress::default()
        );
        assert_eq!(
            remaining(&t, &at(&t, 3), &at(&t, 4), Direction::Backward),
            Progress::default()
        );
    }

    #[test]
    fn undetermined_is_degraded() {
        let t = line();
        let p = remaining(&t, &at(&t, 6), &at(&t, 2), Direction::Undetermined);
        assert_eq!(p.stations_remaining, 4);
        assert_eq!(p.eta_minutes, 0);
        assert!(p.next.is_none());
    }

    #[test]
    fn sparse_orders_count_hops() {
        let t = StationTable::new(vec![
            Station::new("A", 0, Coordinate::new(24.70, 46.7), Some(4)),
            Station::new("B", 5, Coordinate::new(24.71, 46.7), Some(6)),
            Station::new("C", 10, Coordinate::new(24.72, 46.7), None),
        ])
        .unwrap();
        let a = at(&t, 0);
        let c = at(&t, 10);

        let p = remaining(&t, &a, &c, Direction::Forward);
        assert_eq!(p.stations_remaining, 2);
        assert_eq!(p.eta_minutes, 10);
        assert_eq!(p.next.map(|s| s.name), Some("B".to_string()));

        let p = remaining(&t, &a, &c, Direction::Undetermined);
        assert_eq!(p.stations_remaining, 10);
    }

    #[test]
    fn upcoming_in_travel_order() {
        let t = line();
        let orders = |v: Vec<Station>| v.into_iter().map(|s| s.order).collect::<Vec<_>>();

        assert_eq!(
            orders(upcoming(&t, &at(&t, 1), &at(&t, 4), Direction::Forward)),
            vec![2, 3, 4]
        );
        assert_eq!(
            orders(upcoming(&t, &at(&t, 6), &at(&t, 3), Direction::Backward)),
            vec![5, 4, 3]
        );
        assert!(upcoming(&t, &at(&t, 4), &at(&t, 4), Direction::Forward).is_empty());
        assert!(upcoming(&t, &at(&t, 1), &at(&t, 4), Direction::Undetermined).is_empty());
    }
}
