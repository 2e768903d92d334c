//! Rider alerts.
//!
//! The [`AlertSequencer`] turns the engine's edge-triggers into at most one
//! approaching and one arrival alert per trip leg. How an alert is made
//! perceptible (banner, vibration, torch) is presentation policy: it lives
//! behind the [`AlertPresenter`] capability and is timed by
//! [`PresentationConfig`].

mod banner;
mod presenter;
mod sequencer;

pub use banner::{BannerDriver, BannerStep, banner_timeline};
pub use presenter::{AlertPresenter, PresentationConfig};
pub use sequencer::{ActiveAlert, AlertSequencer};
