//! Domain types for the metro trip tracker.
//!
//! This module contains the value types shared by the station table and
//! the trip engine. Stations are immutable once loaded; everything that
//! changes during a trip lives in the tracker.

mod coordinate;
mod direction;
mod error;
mod station;

pub use coordinate::Coordinate;
pub use direction::Direction;
pub use error::TripError;
pub use station::Station;
