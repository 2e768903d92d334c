//! One-shot alert sequencing.

use serde::Serialize;

use crate::domain::Station;

/// An alert for the presentation layer to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveAlert {
    /// The nearest station is the one just before the destination.
    Approaching { station: String, eta_minutes: u32 },
    /// The rider is at the destination.
    Arrival { station: String },
}

impl ActiveAlert {
    /// Name of the destination the alert is about.
    pub fn station(&self) -> &str {
        match self {
            ActiveAlert::Approaching { station, .. } | ActiveAlert::Arrival { station } => station,
        }
    }

    /// Returns true for arrival alerts.
    pub fn is_arrival(&self) -> bool {
        matches!(self, ActiveAlert::Arrival { .. })
    }

    /// Localization key for the banner message.
    pub fn message_key(&self) -> &'static str {
        match self {
            ActiveAlert::Approaching { .. } => "alert.approaching",
            ActiveAlert::Arrival { .. } => "alert.arrived",
        }
    }
}

/// Per-leg alert gate.
///
/// Each kind of alert fires at most once between calls to
/// [`begin_leg`](Self::begin_leg). Once the arrival alert has fired the
/// leg is over, so a late approaching trigger is ignored too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertSequencer {
    fired_approaching: bool,
    fired_arrival: bool,
    active: Option<ActiveAlert>,
}

impl AlertSequencer {
    /// Create a sequencer with nothing fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new leg: re-arm both alerts and drop any active one.
    pub fn begin_leg(&mut self) {
        *self = Self::default();
    }

    /// Fire the approaching alert if it has not fired this leg.
    pub fn approaching(&mut self, destination: &Station, eta_minutes: u32) -> Option<ActiveAlert> {
        if self.fired_approaching || self.fired_arrival {
            return None;
        }
        self.fired_approaching = true;
        self.activate(ActiveAlert::Approaching {
            station: destination.name.clone(),
            eta_minutes,
        })
    }

    /// Fire the arrival alert if it has not fired this leg.
    pub fn arrival(&mut self, destination: &Station) -> Option<ActiveAlert> {
        if self.fired_arrival {
            return None;
        }
        self.fired_arrival = true;
        self.activate(ActiveAlert::Arrival {
            station: destination.name.clone(),
        })
    }

    fn activate(&mut self, alert: ActiveAlert) -> Option<ActiveAlert> {
        self.active = Some(alert.clone());
        Some(alert)
    }

    /// The most recent alert not yet acknowledged.
    pub fn active(&self) -> Option<&ActiveAlert> {
        self.active.as_ref()
    }

    /// Acknowledge the active alert. The one-shot flags are unaffected.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    pub fn fired_approaching(&self) -> bool {
        self.fired_approaching
    }

    pub fn fired_arrival(&self) -> bool {
        self.fired_arrival
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    fn dest() -> Station {
        Station::new("station.kafd", 8, Coordinate::new(24.7671553, 46.6432711), None)
    }

    #[test]
    fn approaching_fires_once() {
        let mut seq = AlertSequencer::new();
        let first = seq.approaching(&dest(), 5);
        assert_eq!(
            first,
            Some(ActiveAlert::Approaching {
                station: "station.kafd".into(),
                eta_minutes: 5
            })
        );
        assert!(seq.approaching(&dest(), 4).is_none());
        assert!(seq.fired_approaching());
    }

    #[test]
    fn arrival_fires_once() {
        let mut seq = AlertSequencer::new();
        assert!(seq.arrival(&dest()).is_some());
        assert!(seq.arrival(&dest()).is_none());
        assert!(seq.fired_arrival());
    }

    #[test]
    fn approaching_suppressed_after_arrival() {
        let mut seq = AlertSequencer::new();
        seq.arrival(&dest());
        assert!(seq.approaching(&dest(), 3).is_none());
        assert!(!seq.fired_approaching());
    }

    #[test]
    fn arrival_after_approaching() {
        let mut seq = AlertSequencer::new();
        seq.approaching(&dest(), 3);
        let alert = seq.arrival(&dest()).unwrap();
        assert!(alert.is_arrival());
        assert_eq!(seq.active(), Some(&alert));
    }

    #[test]
    fn begin_leg_rearms() {
        let mut seq = AlertSequencer::new();
        seq.approaching(&dest(), 3);
        seq.arrival(&dest());
        seq.begin_leg();

        assert_eq!(seq, AlertSequencer::new());
        assert!(seq.approaching(&dest(), 3).is_some());
        assert!(seq.arrival(&dest()).is_some());
    }

    #[test]
    fn clear_active_keeps_flags() {
        let mut seq = AlertSequencer::new();
        seq.arrival(&dest());
        seq.clear_active();

        assert!(seq.active().is_none());
        assert!(seq.arrival(&dest()).is_none());
    }

    #[test]
    fn alert_accessors() {
        let a = ActiveAlert::Approaching {
            station: "station.sabic".into(),
            eta_minutes: 2,
        };
        assert_eq!(a.station(), "station.sabic");
        assert!(!a.is_arrival());
        assert_eq!(a.message_key(), "alert.approaching");

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["kind"], "approaching");
        assert_eq!(json["eta_minutes"], 2);
    }
}
