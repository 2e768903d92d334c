//! Recorded trip traces.

use std::path::Path;

use serde::Deserialize;

use crate::domain::Coordinate;

use super::error::ReplayError;

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TraceStep {
    /// Pick the station with this order as destination
    Select { order: i32 },
    /// Start a leg; a missing position means no fix was available
    Start {
        #[serde(default)]
        position: Option<Coordinate>,
    },
    /// A location sample
    Position {
        #[serde(default)]
        position: Option<Coordinate>,
    },
    End,
    Cancel,
    ClearAlert,
}

/// A named sequence of steps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<TraceStep>,
}

impl Trace {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
