//! Alert presentation capability and timing policy.

use std::time::Duration;

use super::ActiveAlert;

/// Timing for how an alert is made perceptible.
#[derive(Debug, Clone)]
pub struct PresentationConfig {
    /// How long the vibration and torch pattern runs (seconds).
    pub pattern_duration_secs: u64,

    /// How long the banner stays up before it is dismissed (seconds).
    pub banner_auto_dismiss_secs: u64,

    /// Time between pattern pulses (milliseconds).
    pub pulse_interval_ms: u64,
}

impl PresentationConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        pattern_duration_secs: u64,
        banner_auto_dismiss_secs: u64,
        pulse_interval_ms: u64,
    ) -> Self {
        Self {
            pattern_duration_secs,
            banner_auto_dismiss_secs,
            pulse_interval_ms,
        }
    }

    /// Returns the pattern duration as a Duration.
    pub fn pattern_duration(&self) -> Duration {
        Duration::from_secs(self.pattern_duration_secs)
    }

    /// Returns the banner auto-dismiss delay as a Duration.
    pub fn banner_auto_dismiss(&self) -> Duration {
        Duration::from_secs(self.banner_auto_dismiss_secs)
    }

    /// Returns the pulse interval as a Duration.
    pub fn pulse_interval(&self) -> Duration {
        Duration::from_millis(self.pulse_interval_ms)
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            pattern_duration_secs: 5,
            banner_auto_dismiss_secs: 5,
            pulse_interval_ms: 350,
        }
    }
}

/// Host capability for surfacing alerts to the rider.
///
/// Implementations wrap platform services (banner view, haptics, camera
/// torch). Every method must return promptly; the [`BannerDriver`] calls
/// them from a tokio task.
///
/// [`BannerDriver`]: super::BannerDriver
pub trait AlertPresenter: Send + Sync + 'static {
    /// Show the banner for `alert`, replacing any banner already shown.
    fn show_banner(&self, alert: &ActiveAlert);

    /// Hide the banner.
    fn dismiss_banner(&self);

    /// One pattern pulse: vibrate once and set the torch.
    fn pulse(&self, torch_on: bool);

    /// Turn the torch off and stop vibrating.
    fn stop_pattern(&self);
}
