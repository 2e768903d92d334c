//! Tracker service error types.

use crate::domain::TripError;

/// Errors from talking to a running tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The engine rejected the operation
    #[error(transparent)]
    Trip(#[from] TripError),

    /// The tracker task has exited and no longer accepts commands
    #[error("tracker service has stopped")]
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_errors_display_unchanged() {
        let err = ServiceError::from(TripError::NoLocationFix);
        assert_eq!(err.to_string(), "no location fix available");
        assert_eq!(ServiceError::Stopped.to_string(), "tracker service has stopped");
    }
}
