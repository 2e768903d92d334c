//! Replaying recorded trips against a running tracker.
//!
//! A trace is a JSON list of rider actions and location samples. Replaying
//! one drives a [`TrackerHandle`] exactly as a host app would and collects
//! the state published after each step.

mod error;
mod trace;

use tracing::{info, warn};

use crate::domain::TripError;
use crate::line::StationTable;
use crate::service::{ServiceError, TrackerHandle};
use crate::tracker::TripSnapshot;

pub use error::ReplayError;
pub use trace::{Trace, TraceStep};

/// A step the engine refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub step: usize,
    pub error: TripError,
}

/// What a replay produced.
#[derive(Debug, Clone, Default)]
pub struct ReplayOutcome {
    /// State after each step, one per step.
    pub snapshots: Vec<TripSnapshot>,
    pub rejections: Vec<Rejection>,
}

impl ReplayOutcome {
    /// State after the last step.
    pub fn last(&self) -> Option<&TripSnapshot> {
        self.snapshots.last()
    }
}

/// Apply every step of `trace` in order.
///
/// Station orders are resolved against `table`, which should be the table
/// the tracker was built with.
pub async fn replay(
    handle: &TrackerHandle,
    table: &StationTable,
    trace: &Trace,
) -> Result<ReplayOutcome, ReplayError> {
    let mut outcome = ReplayOutcome::default();
    info!(
        name = trace.name.as_deref().unwrap_or("unnamed"),
        steps = trace.steps.len(),
        "Replaying trace"
    );

    for (index, step) in trace.steps.iter().enumerate() {
        let result = match step {
            TraceStep::Select { order } => {
                let station = table.get(*order).ok_or(ReplayError::UnknownStation {
                    step: index,
                    order: *order,
                })?;
                handle.select_destination(station.clone()).await
            }
            TraceStep::Start { position } => handle.start_trip(*position).await.map(drop),
            TraceStep::Position { position } => handle.update_position(*position).await,
            TraceStep::End => handle.end_trip().await,
            TraceStep::Cancel => handle.cancel_and_choose_again().await,
            TraceStep::ClearAlert => match handle.snapshot().active_alert {
                Some(alert) => handle.clear_alert(alert).await.map(drop),
                None => Ok(()),
            },
        };

        match result {
            Ok(()) => {}
            Err(ServiceError::Trip(error)) => {
                warn!(step = index, %error, "Step rejected");
                outcome.rejections.push(Rejection { step: index, error });
            }
            Err(err @ ServiceError::Stopped) => return Err(ReplayError::Service(err)),
        }

        let snapshot = handle.snapshot();
        info!(
            step = index,
            phase = ?snapshot.phase,
            nearest = ?snapshot.current_nearest_station.as_ref().map(|s| s.order),
            remaining = snapshot.stations_remaining,
            eta = snapshot.eta_minutes,
            "Step applied"
        );
        outcome.snapshots.push(snapshot);
    }

    Ok(outcome)
}
