//! The trip-progress engine.
//!
//! One engine follows one rider on one line. Every external event (a
//! destination pick, a position fix, a trip-control action) has exactly one
//! entry point here, and each entry point runs to completion before the next
//! is accepted. Hosts with concurrent event sources serialize them through
//! [`TrackerService`](crate::service::TrackerService).

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::alerts::ActiveAlert;
use crate::domain::{Coordinate, Direction, Station, TripError};
use crate::line::{EndPolicy, StationTable};
use crate::notify::NotificationGateway;

use super::config::TrackerConfig;
use super::progress;
use super::state::{TripPhase, TripSnapshot, TripState};
use super::status::StatusText;

/// Receives the published trip state after every change.
pub trait TripObserver: Send {
    fn trip_changed(&mut self, snapshot: &TripSnapshot);
}

impl<F> TripObserver for F
where
    F: FnMut(&TripSnapshot) + Send,
{
    fn trip_changed(&mut self, snapshot: &TripSnapshot) {
        self(snapshot)
    }
}

/// Tracks a rider's progress toward a destination and raises alerts.
pub struct TripProgressEngine<G: NotificationGateway> {
    table: Arc<StationTable>,
    config: TrackerConfig,
    gateway: G,
    state: TripState,
    observers: Vec<Box<dyn TripObserver>>,
}

impl<G: NotificationGateway> TripProgressEngine<G> {
    /// Create an engine with no trip.
    pub fn new(table: Arc<StationTable>, config: TrackerConfig, gateway: G) -> Self {
        Self {
            table,
            config,
            gateway,
            state: TripState::new(),
            observers: Vec::new(),
        }
    }

    pub fn table(&self) -> &StationTable {
        &self.table
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn state(&self) -> &TripState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    /// The current published view.
    pub fn snapshot(&self) -> TripSnapshot {
        self.state.snapshot()
    }

    /// Register an observer. It is called after every state change.
    pub fn subscribe(&mut self, observer: impl TripObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Choose where the rider is going. Does not start tracking.
    ///
    /// While a leg is being tracked the destination cannot change; the rider
    /// has to cancel first.
    pub fn select_destination(&mut self, station: &Station) -> Result<(), TripError> {
        if self.state.is_tracking {
            return self.fail(TripError::TripInProgress);
        }

        info!(destination = %station, "Destination selected");
        self.state.selected_destination = Some(station.clone());
        self.state.phase = TripPhase::AwaitingStart;
        self.state.status = None;
        self.publish();
        Ok(())
    }

    /// Start a leg toward the selected destination.
    ///
    /// A fresh start locates the rider from `position`. After
    /// [`cancel_and_choose_again`](Self::cancel_and_choose_again) the leg
    /// continues from the last known station instead and `position` is
    /// ignored.
    pub fn start_trip(&mut self, position: Option<Coordinate>) -> Result<TripPhase, TripError> {
        let Some(destination) = self.state.selected_destination.clone() else {
            return self.fail(TripError::NoDestinationSelected);
        };

        let fresh = !self.state.is_changing_destination;
        let (origin, position) = if fresh {
            let Some(position) = position.filter(Coordinate::is_finite) else {
                return self.fail(TripError::NoLocationFix);
            };
            if !self
                .table
                .is_within_range(&position, self.config.near_station_distance_m)
            {
                return self.fail(TripError::NotNearAnyStation);
            }
            (self.table.nearest(&position).clone(), position)
        } else {
            let origin = self
                .state
                .last_passed_station
                .clone()
                .or_else(|| self.state.start_station.clone());
            let Some(origin) = origin else {
                return self.fail(TripError::UnknownOriginState);
            };
            let position = origin.coordinate;
            (origin, position)
        };

        let superseded_leg = self.state.is_tracking;

        self.state.start_station = Some(origin.clone());
        if fresh {
            self.state.last_passed_station = Some(origin.clone());
        }
        self.state.is_changing_destination = false;
        self.state.alerts.begin_leg();

        if origin.same_order(&destination) {
            info!(station = %destination, "Already at destination");
            self.state.current_nearest_station = Some(destination.clone());
            self.state.clear_progress();
            self.state.direction = Direction::Undetermined;
            self.state.is_tracking = false;
            self.state.phase = TripPhase::Arrived;
            self.state.show_arrival_sheet = true;
            self.state.status = Some(if fresh {
                StatusText::AlreadyAtDestination {
                    station: destination.name.clone(),
                }
            } else {
                StatusText::Arrived {
                    station: destination.name.clone(),
                }
            });
            self.state.alerts.arrival(&destination);
            self.gateway.cancel_all();
            self.publish();
            return Ok(TripPhase::Arrived);
        }

        if superseded_leg {
            self.gateway.cancel_all();
        }

        self.state.direction = Direction::between(origin.order, destination.order);
        self.state.is_tracking = true;
        self.state.phase = TripPhase::Tracking;
        self.state.show_arrival_sheet = false;
        self.state.status = None;

        info!(
            origin = %origin,
            destination = %destination,
            direction = %self.state.direction,
            fresh,
            "Trip started"
        );

        self.apply_position(&position, &destination);

        if self.state.phase == TripPhase::Tracking {
            self.schedule_backups(&destination);
        }

        self.publish();
        Ok(self.state.phase)
    }

    /// Feed a position fix. Ignored unless a leg is being tracked.
    ///
    /// A sample with non-finite coordinates counts as no fix.
    pub fn update_progress(&mut self, position: Option<Coordinate>) {
        if !self.state.is_tracking {
            return;
        }
        let Some(position) = position.filter(Coordinate::is_finite) else {
            debug!(?position, "Position update without a usable fix, ignoring");
            return;
        };
        let Some(destination) = self.state.selected_destination.clone() else {
            return;
        };

        self.apply_position(&position, &destination);
        self.publish();
    }

    /// Whether `station` is on the already-passed side of the rider.
    ///
    /// The reference is the last passed station, falling back to the
    /// nearest station and then the start.
    pub fn is_station_reached(&self, station: &Station) -> bool {
        let reference = self
            .state
            .last_passed_station
            .as_ref()
            .or(self.state.current_nearest_station.as_ref())
            .or(self.state.start_station.as_ref());

        let Some(reference) = reference else {
            return false;
        };

        match self.state.direction {
            Direction::Forward => station.order <= reference.order,
            Direction::Backward => station.order >= reference.order,
            Direction::Undetermined => false,
        }
    }

    /// Stations strictly between the start and the destination, in travel
    /// order.
    pub fn middle_stations(&self) -> Vec<Station> {
        let (Some(start), Some(destination)) = (
            self.state.start_station.as_ref(),
            self.state.selected_destination.as_ref(),
        ) else {
            return Vec::new();
        };

        let direction = Direction::between(start.order, destination.order);
        self.table
            .stations_between(start.order, destination.order, direction, EndPolicy::Exclude)
            .into_iter()
            .cloned()
            .collect()
    }

    /// End the trip and forget everything about it.
    pub fn end_trip(&mut self) {
        info!("Trip ended");
        self.state = TripState::new();
        self.gateway.cancel_all();
        self.publish();
    }

    /// Abandon the current destination but remember where the rider is, so
    /// the next start can continue without a fresh fix.
    pub fn cancel_and_choose_again(&mut self) {
        if let Some(current) = self.state.current_nearest_station.clone() {
            self.state.last_passed_station = Some(current);
        }

        self.state.selected_destination = None;
        self.state.clear_progress();
        self.state.direction = Direction::Undetermined;
        self.state.is_tracking = false;
        self.state.show_arrival_sheet = false;
        self.state.alerts.begin_leg();
        self.state.status = None;
        self.state.is_changing_destination = true;
        self.state.phase = TripPhase::Idle;

        info!(
            from = ?self.state.last_passed_station.as_ref().map(|s| s.order),
            "Destination cancelled, choosing again"
        );
        self.gateway.cancel_all();
        self.publish();
    }

    /// The presentation layer has shown `alert`.
    ///
    /// Only clears the active alert if it is still `alert`; one raised in
    /// the meantime stays active until it has been shown too. Returns true
    /// if the alert was cleared.
    pub fn clear_active_alert(&mut self, alert: &ActiveAlert) -> bool {
        if self.state.alerts.active() != Some(alert) {
            debug!(
                presented = alert.message_key(),
                "Acknowledged alert is no longer active, keeping current"
            );
            return false;
        }
        self.state.alerts.clear_active();
        self.publish();
        true
    }

    fn apply_position(&mut self, position: &Coordinate, destination: &Station) {
        let nearest = self.table.nearest(position).clone();
        let direction = self.state.direction;

        let nearest_changed = self
            .state
            .current_nearest_station
            .as_ref()
            .is_none_or(|current| !current.same_order(&nearest));
        if nearest_changed {
            if self.accepts_as_passed(&nearest) {
                self.state.last_passed_station = Some(nearest.clone());
            } else {
                warn!(
                    nearest = nearest.order,
                    %direction,
                    "Nearest station moved against direction of travel, keeping last passed"
                );
            }
        }
        self.state.current_nearest_station = Some(nearest.clone());

        let p = progress::remaining(&self.table, &nearest, destination, direction);
        self.state.stations_remaining = p.stations_remaining;
        self.state.eta_minutes = p.eta_minutes;
        self.state.next_station = p.next;
        self.state.upcoming_stations =
            progress::upcoming(&self.table, &nearest, destination, direction);

        debug!(
            nearest = nearest.order,
            remaining = self.state.stations_remaining,
            eta = self.state.eta_minutes,
            "Progress updated"
        );

        let distance = position.distance_m(&destination.coordinate);
        if distance <= self.config.arrival_distance_m {
            self.arrive(destination);
            return;
        }

        self.state.status = None;

        let before_destination = self
            .table
            .neighbor(destination.order, direction.reversed());
        if let Some(before) = before_destination
            && before.same_order(&nearest)
            && let Some(alert) = self
                .state
                .alerts
                .approaching(destination, self.state.eta_minutes)
        {
            info!(station = %alert.station(), eta = self.state.eta_minutes, "Approaching destination");
            self.gateway.schedule_approaching(0, &destination.name);
        }
    }

    fn arrive(&mut self, destination: &Station) {
        self.state.clear_progress();
        self.state.is_tracking = false;
        self.state.phase = TripPhase::Arrived;
        self.state.show_arrival_sheet = true;
        self.state.status = Some(StatusText::Arrived {
            station: destination.name.clone(),
        });

        if self.state.alerts.arrival(destination).is_some() {
            info!(station = %destination, "Arrived");
            self.gateway.cancel_all();
            self.gateway.schedule_arrival(0, &destination.name);
        }
    }

    fn accepts_as_passed(&self, nearest: &Station) -> bool {
        if !self.config.monotonic_last_passed {
            return true;
        }
        match self.state.last_passed_station.as_ref() {
            Some(last) => !self.state.direction.is_ahead(nearest.order, last.order),
            None => true,
        }
    }

    /// Ask the gateway for backup notifications in case position updates
    /// stop arriving.
    ///
    /// The approaching backup goes out at `eta - lead` when the ETA exceeds
    /// the lead time, unless the approaching alert already fired while the
    /// leg was being set up: approaching is one event per leg, and that
    /// event has just been delivered as an immediate notification.
    fn schedule_backups(&mut self, destination: &Station) {
        let eta = i64::from(self.state.eta_minutes);
        let lead = i64::from(self.config.approaching_lead_mins);

        if eta > lead && !self.state.fired_approaching() {
            self.gateway
                .schedule_approaching((eta - lead).max(1), &destination.name);
        }
        if eta > 0 {
            self.gateway.schedule_arrival(eta, &destination.name);
        }
    }

    fn fail<T>(&mut self, err: TripError) -> Result<T, TripError> {
        debug!(error = %err, "Trip operation rejected");
        self.state.status = Some(err.into());
        self.publish();
        Err(err)
    }

    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.state.snapshot();
        for observer in &mut self.observers {
            observer.trip_changed(&snapshot);
        }
    }
}
