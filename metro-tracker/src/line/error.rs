//! Station table error types.

use std::path::PathBuf;

/// Errors that can occur when building a station table.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// The table has no stations
    #[error("a line must have at least one station")]
    EmptyLine,

    /// Two stations share the same order
    #[error("duplicate station order {0}")]
    DuplicateOrder(i32),

    /// Seed data could not be parsed
    #[error("invalid station data: {0}")]
    Json(#[from] serde_json::Error),

    /// Seed file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
