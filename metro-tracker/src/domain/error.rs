//! Trip error types.
//!
//! These are the recoverable failures of trip-control operations. None of
//! them aborts anything: the engine records a status for the rider and
//! leaves the trip state as it was, so the caller can simply retry.

/// Errors from starting or steering a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    /// A trip was started before a destination was chosen
    #[error("no destination selected")]
    NoDestinationSelected,

    /// A fresh start needs a position fix and none was available
    #[error("no location fix available")]
    NoLocationFix,

    /// The rider is too far from every station to establish a start
    #[error("not near any station on the line")]
    NotNearAnyStation,

    /// A destination change was requested with no previous position reference
    #[error("unknown origin: no previous station to continue from")]
    UnknownOriginState,

    /// The destination cannot change while a leg is being tracked
    #[error("a trip is already in progress")]
    TripInProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            TripError::NoDestinationSelected.to_string(),
            "no destination selected"
        );
        assert_eq!(
            TripError::NoLocationFix.to_string(),
            "no location fix available"
        );
        assert_eq!(
            TripError::NotNearAnyStation.to_string(),
            "not near any station on the line"
        );
        assert_eq!(
            TripError::UnknownOriginState.to_string(),
            "unknown origin: no previous station to continue from"
        );
        assert_eq!(
            TripError::TripInProgress.to_string(),
            "a trip is already in progress"
        );
    }
}
