//! Tracker configuration.

use chrono::Duration;

/// Environment variable overriding the near-station radius (meters).
pub const NEAR_STATION_ENV: &str = "METRO_NEAR_STATION_METERS";

/// Environment variable overriding the arrival radius (meters).
pub const ARRIVAL_ENV: &str = "METRO_ARRIVAL_METERS";

/// Environment variable overriding the approaching lead time (minutes).
pub const APPROACHING_LEAD_ENV: &str = "METRO_APPROACHING_LEAD_MINS";

/// Environment variable enabling the last-passed direction guard.
pub const MONOTONIC_ENV: &str = "METRO_MONOTONIC_LAST_PASSED";

/// Error from reading configuration overrides.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
}

/// Configuration parameters for trip tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// How close a fresh position must be to some station to start a trip
    /// (meters).
    pub near_station_distance_m: f64,

    /// Raw distance to the destination at which the rider has arrived
    /// (meters).
    pub arrival_distance_m: f64,

    /// How long before the ETA the backup approaching notification fires
    /// (minutes).
    pub approaching_lead_mins: u32,

    /// Refuse to move the last-passed station against the direction of
    /// travel. Off by default: any change of nearest station counts as
    /// passing it.
    pub monotonic_last_passed: bool,
}

impl TrackerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        near_station_distance_m: f64,
        arrival_distance_m: f64,
        approaching_lead_mins: u32,
        monotonic_last_passed: bool,
    ) -> Self {
        Self {
            near_station_distance_m,
            arrival_distance_m,
            approaching_lead_mins,
            monotonic_last_passed,
        }
    }

    /// Apply overrides from a variable lookup (usually `std::env::var`).
    ///
    /// Unset variables keep the current value; unparsable ones are an error.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, NEAR_STATION_ENV)? {
            self.near_station_distance_m = v;
        }
        if let Some(v) = parse_var(&lookup, ARRIVAL_ENV)? {
            self.arrival_distance_m = v;
        }
        if let Some(v) = parse_var(&lookup, APPROACHING_LEAD_ENV)? {
            self.approaching_lead_mins = v;
        }
        if let Some(v) = parse_var(&lookup, MONOTONIC_ENV)? {
            self.monotonic_last_passed = v;
        }
        Ok(self)
    }

    /// Returns the approaching lead time as a Duration.
    pub fn approaching_lead(&self) -> Duration {
        Duration::minutes(i64::from(self.approaching_lead_mins))
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            near_station_distance_m: 1_000.0,
            arrival_distance_m: 10.0,
            approaching_lead_mins: 3,
            monotonic_last_passed: false,
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value }),
    }
}
