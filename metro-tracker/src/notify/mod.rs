//! Local notification scheduling.
//!
//! The tracker never owns timers. When a leg starts it asks a
//! [`NotificationGateway`] to schedule backup notifications so the rider is
//! alerted even if the host stops delivering position updates; when the leg
//! ends or changes it asks the gateway to cancel them.
//!
//! Gateways have replace semantics: scheduling a kind that is already
//! pending supersedes the earlier request.

mod pending;

use std::fmt;

use chrono::Duration;
use serde::Serialize;

pub use pending::PendingNotifications;

/// The two notifications a trip leg can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Approaching,
    Arrival,
}

impl NotificationKind {
    /// Stable request identifier, one per kind.
    pub fn identifier(self) -> &'static str {
        match self {
            NotificationKind::Approaching => "approaching_notification",
            NotificationKind::Arrival => "arrival_notification",
        }
    }

    /// Localization key for the notification title.
    pub fn title_key(self) -> &'static str {
        match self {
            NotificationKind::Approaching => "alert.approaching",
            NotificationKind::Arrival => "alert.arrived",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Convert a requested lead time in minutes to a firing delay.
///
/// Zero or negative minutes mean "now", which is coerced to a one-second
/// delay instead of being rejected.
///
/// ```
/// use chrono::Duration;
/// use metro_tracker::notify::fire_delay;
///
/// assert_eq!(fire_delay(4), Duration::minutes(4));
/// assert_eq!(fire_delay(0), Duration::seconds(1));
/// assert_eq!(fire_delay(-2), Duration::seconds(1));
/// ```
pub fn fire_delay(minutes: i64) -> Duration {
    if minutes <= 0 {
        Duration::seconds(1)
    } else {
        Duration::minutes(minutes)
    }
}

/// A pending notification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRequest {
    pub kind: NotificationKind,
    pub station_name: String,
    /// Delay from the moment the request was submitted.
    #[serde(serialize_with = "serialize_secs")]
    pub delay: Duration,
}

impl NotificationRequest {
    /// Build a request, coercing `minutes` with [`fire_delay`].
    pub fn new(kind: NotificationKind, minutes: i64, station_name: impl Into<String>) -> Self {
        Self {
            kind,
            station_name: station_name.into(),
            delay: fire_delay(minutes),
        }
    }
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(d.num_seconds())
}

/// Host capability for scheduling local notifications.
///
/// Calls are fire-and-forget: the tracker does not wait for, or observe the
/// outcome of, any request.
pub trait NotificationGateway {
    /// Schedule the "approaching destination" notification.
    fn schedule_approaching(&mut self, minutes: i64, station_name: &str);

    /// Schedule the "arrived" notification.
    fn schedule_arrival(&mut self, minutes: i64, station_name: &str);

    /// Cancel every pending trip notification.
    fn cancel_all(&mut self);
}

impl<G: NotificationGateway + ?Sized> NotificationGateway for Box<G> {
    fn schedule_approaching(&mut self, minutes: i64, station_name: &str) {
        (**self).schedule_approaching(minutes, station_name);
    }

    fn schedule_arrival(&mut self, minutes: i64, station_name: &str) {
        (**self).schedule_arrival(minutes, station_name);
    }

    fn cancel_all(&mut self) {
        (**self).cancel_all();
    }
}
