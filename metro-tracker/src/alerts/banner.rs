//! Banner and pulse-pattern escalation.
//!
//! When an alert becomes active the banner is shown, the device vibrates
//! and toggles its torch on every pulse until the pattern duration has
//! elapsed, and the banner is dismissed after the auto-dismiss delay.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use super::{ActiveAlert, AlertPresenter, PresentationConfig};

/// One timed step of a banner presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerStep {
    Pulse { torch_on: bool },
    StopPattern,
    Dismiss,
}

/// The steps of one presentation, as offsets from the moment it is shown.
///
/// Pulses run strictly before the pattern stops. If the banner is
/// dismissed before the pattern would end, the pattern stops at dismissal.
pub fn banner_timeline(config: &PresentationConfig) -> Vec<(Duration, BannerStep)> {
    let interval = config.pulse_interval();
    let dismiss_at = config.banner_auto_dismiss();
    let stop_at = config.pattern_duration().min(dismiss_at);

    let mut steps = Vec::new();
    if !interval.is_zero() {
        let mut at = interval;
        let mut torch_on = true;
        while at < stop_at {
            steps.push((at, BannerStep::Pulse { torch_on }));
            torch_on = !torch_on;
            at += interval;
        }
    }
    steps.push((stop_at, BannerStep::StopPattern));
    steps.push((dismiss_at, BannerStep::Dismiss));
    steps
}

/// Runs banner presentations on the tokio runtime.
///
/// Only one presentation runs at a time; presenting a new alert stops the
/// running pattern first. Must be used from within a tokio runtime.
pub struct BannerDriver<P: AlertPresenter> {
    presenter: Arc<P>,
    config: PresentationConfig,
    task: Option<JoinHandle<()>>,
}

impl<P: AlertPresenter> BannerDriver<P> {
    /// Create a driver for the given presenter.
    pub fn new(presenter: Arc<P>, config: PresentationConfig) -> Self {
        Self {
            presenter,
            config,
            task: None,
        }
    }

    /// Show `alert` and start its pattern, superseding any running one.
    pub fn present(&mut self, alert: &ActiveAlert) {
        self.stop_running();

        debug!(
            kind = alert.message_key(),
            station = %alert.station(),
            "Presenting alert"
        );
        self.presenter.show_banner(alert);

        let presenter = Arc::clone(&self.presenter);
        let timeline = banner_timeline(&self.config);
        let start = Instant::now();

        self.task = Some(tokio::spawn(async move {
            for (offset, step) in timeline {
                tokio::time::sleep_until(start + offset).await;
                match step {
                    BannerStep::Pulse { torch_on } => presenter.pulse(torch_on),
                    BannerStep::StopPattern => presenter.stop_pattern(),
                    BannerStep::Dismiss => presenter.dismiss_banner(),
                }
            }
        }));
    }

    /// Dismiss the banner now and stop the pattern.
    pub fn dismiss(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.presenter.stop_pattern();
        self.presenter.dismiss_banner();
    }

    /// Returns true while a presentation is still running.
    pub fn is_presenting(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn stop_running(&mut self) {
        if let Some(task) = self.task.take()
            && !task.is_finished()
        {
            task.abort();
            self.presenter.stop_pattern();
        }
    }
}

impl<P: AlertPresenter> Drop for BannerDriver<P> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Presenter that records every call.
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn count(&self, event: &str) -> usize {
            self.events().iter().filter(|e| *e == event).count()
        }

        fn push(&self, event: impl Into<String>) {
            self.events.lock().unwrap().push(event.into());
        }
    }

    impl AlertPresenter for Recorder {
        fn show_banner(&self, alert: &ActiveAlert) {
            self.push(format!("show:{}", alert.message_key()));
        }

        fn dismiss_banner(&self) {
            self.push("dismiss");
        }

        fn pulse(&self, torch_on: bool) {
            self.push(if torch_on { "pulse:on" } else { "pulse:off" });
        }

        fn stop_pattern(&self) {
            self.push("stop");
        }
    }

    fn arrival() -> ActiveAlert {
        ActiveAlert::Arrival {
            station: "station.kafd".into(),
        }
    }

    fn approaching() -> ActiveAlert {
        ActiveAlert::Approaching {
            station: "station.kafd".into(),
            eta_minutes: 5,
        }
    }

    #[test]
    fn default_timeline() {
        let steps = banner_timeline(&PresentationConfig::default());

        let pulses: Vec<_> = steps
            .iter()
            .filter(|(_, s)| matches!(s, BannerStep::Pulse { .. }))
            .collect();
        // 350ms .. 4900ms
        assert_eq!(pulses.len(), 14);
        assert_eq!(pulses[0].1, BannerStep::Pulse { torch_on: true });
        assert_eq!(pulses[1].1, BannerStep::Pulse { torch_on: false });

        let n = steps.len();
        assert_eq!(steps[n - 2], (Duration::from_secs(5), BannerStep::StopPattern));
        assert_eq!(steps[n - 1], (Duration::from_secs(5), BannerStep::Dismiss));
    }

    #[test]
    fn early_dismiss_cuts_pattern() {
        let steps = banner_timeline(&PresentationConfig::new(15, 1, 350));
        assert_eq!(
            steps,
            vec![
                (Duration::from_millis(350), BannerStep::Pulse { torch_on: true }),
                (Duration::from_millis(700), BannerStep::Pulse { torch_on: false }),
                (Duration::from_secs(1), BannerStep::StopPattern),
                (Duration::from_secs(1), BannerStep::Dismiss),
            ]
        );
    }

    #[test]
    fn zero_interval_has_no_pulses() {
        let steps = banner_timeline(&PresentationConfig::new(5, 60, 0));
        assert_eq!(
            steps,
            vec![
                (Duration::from_secs(5), BannerStep::StopPattern),
                (Duration::from_secs(60), BannerStep::Dismiss),
            ]
        );
    }

    #[test]
    fn timeline_is_sorted() {
        let steps = banner_timeline(&PresentationConfig::new(3, 10, 250));
        assert!(steps.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[tokio::test(start_paused = true)]
    async fn full_presentation() {
        let recorder = Arc::new(Recorder::default());
        let mut driver = BannerDriver::new(Arc::clone(&recorder), PresentationConfig::default());

        driver.present(&arrival());
        assert!(driver.is_presenting());

        tokio::time::sleep(Duration::from_secs(6)).await;

        let events = recorder.events();
        assert_eq!(events.first().map(String::as_str), Some("show:alert.arrived"));
        assert_eq!(recorder.count("pulse:on") + recorder.count("pulse:off"), 14);
        assert_eq!(&events[events.len() - 2..], ["stop", "dismiss"]);
        assert!(!driver.is_presenting());
    }

    #[tokio::test(start_paused = true)]
    async fn new_alert_supersedes_running_pattern() {
        let recorder = Arc::new(Recorder::default());
        let mut driver = BannerDriver::new(Arc::clone(&recorder), PresentationConfig::default());

        driver.present(&approaching());
        tokio::time::sleep(Duration::from_secs(1)).await;
        driver.present(&arrival());
        tokio::time::sleep(Duration::from_secs(6)).await;

        let events = recorder.events();
        assert_eq!(
            &events[..5],
            ["show:alert.approaching", "pulse:on", "pulse:off", "stop", "show:alert.arrived"]
        );
        assert_eq!(recorder.count("dismiss"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_dismiss_stops_everything() {
        let recorder = Arc::new(Recorder::default());
        let mut driver = BannerDriver::new(Arc::clone(&recorder), PresentationConfig::default());

        driver.present(&arrival());
        tokio::time::sleep(Duration::from_millis(500)).await;
        driver.dismiss();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(
            recorder.events(),
            vec!["show:alert.arrived", "pulse:on", "stop", "dismiss"]
        );
        assert!(!driver.is_presenting());
    }
}
