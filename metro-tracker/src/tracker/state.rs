//! Trip state and its published snapshot.

use serde::Serialize;

use crate::alerts::{ActiveAlert, AlertSequencer};
use crate::domain::{Direction, Station};

use super::status::StatusText;

/// Where the current trip is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripPhase {
    /// No destination chosen.
    #[default]
    Idle,
    /// Destination chosen, trip not started.
    AwaitingStart,
    /// Direction known, following position updates.
    Tracking,
    /// Destination reached. A new destination starts another leg.
    Arrived,
}

/// Mutable state of one trip, owned by the engine.
///
/// Outside the engine it is only ever seen by shared reference.
#[derive(Debug, Clone, Default)]
pub struct TripState {
    pub phase: TripPhase,
    pub selected_destination: Option<Station>,
    pub start_station: Option<Station>,
    pub last_passed_station: Option<Station>,
    pub current_nearest_station: Option<Station>,
    pub next_station: Option<Station>,
    pub direction: Direction,
    pub stations_remaining: u32,
    pub eta_minutes: u32,
    /// Stations after the current one up to the destination, in travel order.
    pub upcoming_stations: Vec<Station>,
    pub is_tracking: bool,
    /// Set by a cancel-and-choose-again; the next start continues from the
    /// last known station instead of waiting for a fix.
    pub is_changing_destination: bool,
    pub status: Option<StatusText>,
    pub show_arrival_sheet: bool,
    pub alerts: AlertSequencer,
}

impl TripState {
    /// An empty state: no trip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the values derived from the current position.
    pub(crate) fn clear_progress(&mut self) {
        self.next_station = None;
        self.stations_remaining = 0;
        self.eta_minutes = 0;
        self.upcoming_stations.clear();
    }

    pub fn fired_approaching(&self) -> bool {
        self.alerts.fired_approaching()
    }

    pub fn fired_arrival(&self) -> bool {
        self.alerts.fired_arrival()
    }

    pub fn active_alert(&self) -> Option<&ActiveAlert> {
        self.alerts.active()
    }

    /// The published view of this state.
    pub fn snapshot(&self) -> TripSnapshot {
        TripSnapshot {
            phase: self.phase,
            is_tracking: self.is_tracking,
            selected_destination: self.selected_destination.clone(),
            start_station: self.start_station.clone(),
            current_nearest_station: self.current_nearest_station.clone(),
            last_passed_station: self.last_passed_station.clone(),
            next_station: self.next_station.clone(),
            direction: self.direction,
            stations_remaining: self.stations_remaining,
            eta_minutes: self.eta_minutes,
            status: self.status.clone(),
            show_arrival_sheet: self.show_arrival_sheet,
            active_alert: self.alerts.active().cloned(),
            upcoming_stations: self.upcoming_stations.clone(),
            is_changing_destination: self.is_changing_destination,
        }
    }
}

/// Everything the presentation layer observes about a trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TripSnapshot {
    pub phase: TripPhase,
    pub is_tracking: bool,
    pub selected_destination: Option<Station>,
    pub start_station: Option<Station>,
    pub current_nearest_station: Option<Station>,
    pub last_passed_station: Option<Station>,
    pub next_station: Option<Station>,
    pub direction: Direction,
    pub stations_remaining: u32,
    pub eta_minutes: u32,
    pub status: Option<StatusText>,
    pub show_arrival_sheet: bool,
    pub active_alert: Option<ActiveAlert>,
    pub upcoming_stations: Vec<Station>,
    pub is_changing_destination: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn station(order: i32) -> Station {
        Station::new(format!("S{order}"), order, Coordinate::new(24.7, 46.7), Some(2))
    }

    #[test]
    fn new_state_is_idle() {
        let state = TripState::new();
        assert_eq!(state.phase, TripPhase::Idle);
        assert!(!state.is_tracking);
        assert!(!state.fired_approaching());
        assert!(!state.fired_arrival());
        assert_eq!(state.snapshot(), TripSnapshot::default());
    }

    #[test]
    fn clear_progress_keeps_stations() {
        let mut state = TripState::new();
        state.start_station = Some(station(1));
        state.next_station = Some(station(2));
        state.stations_remaining = 3;
        state.eta_minutes = 7;
        state.upcoming_stations = vec![station(2), station(3)];

        state.clear_progress();

        assert_eq!(state.start_station, Some(station(1)));
        assert!(state.next_station.is_none());
        assert_eq!(state.stations_remaining, 0);
        assert_eq!(state.eta_minutes, 0);
        assert!(state.upcoming_stations.is_empty());
    }

    #[test]
    fn snapshot_carries_active_alert() {
        let mut state = TripState::new();
        state.alerts.arrival(&station(4));
        let snap = state.snapshot();
        assert_eq!(
            snap.active_alert,
            Some(ActiveAlert::Arrival {
                station: "S4".into()
            })
        );
    }

    #[test]
    fn snapshot_json_shape() {
        let mut state = TripState::new();
        state.phase = TripPhase::Tracking;
        state.direction = Direction::Forward;
        state.status = Some(StatusText::NoLocation);

        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["phase"], "tracking");
        assert_eq!(json["direction"], "forward");
        assert_eq!(json["status"]["key"], "sheet.status.noLocation");
        assert!(json["active_alert"].is_null());
    }
}
