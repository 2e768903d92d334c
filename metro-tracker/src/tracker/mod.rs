//! Trip progress tracking.
//!
//! This module implements the core of the tracker: given the station table
//! and a stream of position fixes, it works out the direction of travel,
//! the nearest and last-passed stations, how many stations and minutes
//! remain, and when to raise approaching and arrival alerts.

mod config;
mod engine;
mod progress;
mod state;
mod status;


pub use config::{
    APPROACHING_LEAD_ENV, ARRIVAL_ENV, ConfigError, MONOTONIC_ENV, NEAR_STATION_ENV,
    TrackerConfig,
};
pub use engine::{TripObserver, TripProgressEngine};
pub use progress::{Progress, remaining, upcoming};
pub use state::{TripPhase, TripSnapshot, TripState};
pub use status::StatusText;
