//! Metro trip tracker.
//!
//! Follows a rider along a single metro line: "I'm heading to this
//! station, tell me how far I have left and wake me before my stop."

pub mod alerts;
pub mod domain;
pub mod line;
pub mod notify;
pub mod replay;
pub mod service;
pub mod tracker;
