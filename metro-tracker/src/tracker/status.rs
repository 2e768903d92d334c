//! Rider-facing status messages.

use serde::{Serialize, Serializer};

use crate::domain::TripError;

/// A status message for the rider, as a localization key plus an optional
/// station-name argument. Localization happens in the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusText {
    ChooseDestination,
    NoLocation,
    NotNearMetro,
    Unknown,
    TripInProgress,
    Arrived { station: String },
    AlreadyAtDestination { station: String },
}

impl StatusText {
    /// The localization key.
    pub fn key(&self) -> &'static str {
        match self {
            StatusText::ChooseDestination => "sheet.status.chooseDestination",
            StatusText::NoLocation => "sheet.status.noLocation",
            StatusText::NotNearMetro => "sheet.status.notNearMetro",
            StatusText::Unknown => "error.unknown",
            StatusText::TripInProgress => "sheet.status.tripInProgress",
            StatusText::Arrived { .. } => "alert.arrived",
            StatusText::AlreadyAtDestination { .. } => "trip.status.alreadyAtDestination",
        }
    }

    /// The station name substituted into the message, if any.
    pub fn station(&self) -> Option<&str> {
        match self {
            StatusText::Arrived { station } | StatusText::AlreadyAtDestination { station } => {
                Some(station)
            }
            _ => None,
        }
    }
}

impl From<TripError> for StatusText {
    fn from(err: TripError) -> Self {
        match err {
            TripError::NoDestinationSelected => StatusText::ChooseDestination,
            TripError::NoLocationFix => StatusText::NoLocation,
            TripError::NotNearAnyStation => StatusText::NotNearMetro,
            TripError::UnknownOriginState => StatusText::Unknown,
            TripError::TripInProgress => StatusText::TripInProgress,
        }
    }
}

#[derive(Serialize)]
struct StatusView<'a> {
    key: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    station: Option<&'a str>,
}

impl Serialize for StatusText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        StatusView {
            key: self.key(),
            station: self.station(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_distinct_keys() {
        let errors = [
            TripError::NoDestinationSelected,
            TripError::NoLocationFix,
            TripError::NotNearAnyStation,
            TripError::UnknownOriginState,
            TripError::TripInProgress,
        ];
        let mut keys: Vec<_> = errors
            .into_iter()
            .map(|e| StatusText::from(e).key())
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), errors.len());
    }

    #[test]
    fn station_argument() {
        let s = StatusText::Arrived {
            station: "station.kafd".into(),
        };
        assert_eq!(s.key(), "alert.arrived");
        assert_eq!(s.station(), Some("station.kafd"));
        assert_eq!(StatusText::NoLocation.station(), None);
    }

    #[test]
    fn serializes_key_and_station() {
        let s = StatusText::AlreadyAtDestination {
            station: "station.sabic".into(),
        };
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            serde_json::json!({"key": "trip.status.alreadyAtDestination", "station": "station.sabic"})
        );
        assert_eq!(
            serde_json::to_value(StatusText::NotNearMetro).unwrap(),
            serde_json::json!({"key": "sheet.status.notNearMetro"})
        );
    }
}
