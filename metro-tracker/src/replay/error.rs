//! Replay error types.

use std::path::PathBuf;

use crate::service::ServiceError;

/// Errors that stop a replay.
///
/// Steps the engine rejects are not errors here; they are recorded in the
/// outcome and the replay carries on.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Trace could not be parsed
    #[error("invalid trace: {0}")]
    Json(#[from] serde_json::Error),

    /// Trace file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A step names a station order the line does not have
    #[error("step {step}: no station with order {order}")]
    UnknownStation { step: usize, order: i32 },

    /// The tracker stopped mid-replay
    #[error("tracker unavailable: {0}")]
    Service(#[source] ServiceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ReplayError::UnknownStation { step: 2, order: 42 };
        assert_eq!(err.to_string(), "step 2: no station with order 42");

        let err = ReplayError::Service(ServiceError::Stopped);
        assert_eq!(
            err.to_string(),
            "tracker unavailable: tracker service has stopped"
        );
    }
}
