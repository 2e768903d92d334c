//! In-memory notification gateway.

use std::collections::BTreeMap;

use chrono::Duration;
use tracing::debug;

use super::{NotificationGateway, NotificationKind, NotificationRequest};

/// A request together with its firing time on the gateway's clock.
#[derive(Debug, Clone)]
struct Scheduled {
    request: NotificationRequest,
    fire_at: Duration,
}

/// Notification gateway that keeps pending requests in memory.
///
/// At most one request per [`NotificationKind`] is pending at a time.
/// Time is logical: [`advance`](Self::advance) moves the clock forward and
/// returns whatever became due, which lets hosts without an OS scheduler
/// (and tests) observe the backup notifications a leg would produce.
#[derive(Debug, Clone)]
pub struct PendingNotifications {
    pending: BTreeMap<NotificationKind, Scheduled>,
    clock: Duration,
    cancellations: usize,
}

impl PendingNotifications {
    /// Create an empty gateway with its clock at zero.
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            clock: Duration::zero(),
            cancellations: 0,
        }
    }

    /// The pending request of the given kind, if any.
    pub fn get(&self, kind: NotificationKind) -> Option<&NotificationRequest> {
        self.pending.get(&kind).map(|s| &s.request)
    }

    /// All pending requests, approaching first.
    pub fn requests(&self) -> impl Iterator<Item = &NotificationRequest> {
        self.pending.values().map(|s| &s.request)
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// How many times `cancel_all` has been called.
    pub fn cancellations(&self) -> usize {
        self.cancellations
    }

    /// Time elapsed on the gateway's clock.
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    /// Advance the clock and return the requests that fell due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<NotificationRequest> {
        self.clock += by;
        let now = self.clock;

        let due: Vec<NotificationKind> = self
            .pending
            .iter()
            .filter(|(_, s)| s.fire_at <= now)
            .map(|(kind, _)| *kind)
            .collect();

        let mut fired: Vec<Scheduled> = due
            .into_iter()
            .filter_map(|kind| self.pending.remove(&kind))
            .collect();
        fired.sort_by_key(|s| s.fire_at);

        fired.into_iter().map(|s| s.request).collect()
    }

    fn submit(&mut self, request: NotificationRequest) {
        let fire_at = self.clock + request.delay;
        debug!(
            kind = %request.kind,
            station = %request.station_name,
            delay_secs = request.delay.num_seconds(),
            "Scheduling notification"
        );
        if self
            .pending
            .insert(request.kind, Scheduled { request, fire_at })
            .is_some()
        {
            debug!("Replaced pending notification of the same kind");
        }
    }
}

impl Default for PendingNotifications {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationGateway for PendingNotifications {
    fn schedule_approaching(&mut self, minutes: i64, station_name: &str) {
        self.submit(NotificationRequest::new(
            NotificationKind::Approaching,
            minutes,
            station_name,
        ));
    }

    fn schedule_arrival(&mut self, minutes: i64, station_name: &str) {
        self.submit(NotificationRequest::new(
            NotificationKind::Arrival,
            minutes,
            station_name,
        ));
    }

    fn cancel_all(&mut self) {
        debug!(pending = self.pending.len(), "Cancelling trip notifications");
        self.pending.clear();
        self.cancellations += 1;
    }
}
