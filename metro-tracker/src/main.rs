use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use metro_tracker::alerts::{ActiveAlert, AlertPresenter, BannerDriver, PresentationConfig};
use metro_tracker::line::{LineError, StationTable, yellow_line};
use metro_tracker::notify::{NotificationRequest, PendingNotifications};
use metro_tracker::replay::{ReplayError, Trace, replay};
use metro_tracker::service::{ServiceError, TrackerService, spawn_alert_presenter};
use metro_tracker::tracker::{ConfigError, TrackerConfig, TripProgressEngine, TripSnapshot};
use serde::Serialize;
use tracing::{error, info, trace};
use tracing_subscriber::EnvFilter;

/// Path to a JSON station table replacing the built-in yellow line.
const STATIONS_ENV: &str = "METRO_STATIONS";

const DEFAULT_TRACE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/demo_trip.json");

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Line(#[from] LineError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Presenter that writes alerts to the log.
struct LogPresenter;

impl AlertPresenter for LogPresenter {
    fn show_banner(&self, alert: &ActiveAlert) {
        match alert {
            ActiveAlert::Approaching {
                station,
                eta_minutes,
            } => info!(%station, eta_minutes, "Banner: approaching"),
            ActiveAlert::Arrival { station } => info!(%station, "Banner: arrived"),
        }
    }

    fn dismiss_banner(&self) {
        info!("Banner dismissed");
    }

    fn pulse(&self, torch_on: bool) {
        trace!(torch_on, "Pulse");
    }

    fn stop_pattern(&self) {
        trace!("Pattern stopped");
    }
}

#[derive(Serialize)]
struct Report<'a> {
    snapshot: &'a TripSnapshot,
    rejected_steps: Vec<usize>,
    pending_notifications: Vec<&'a NotificationRequest>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Replay failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = TrackerConfig::default().with_overrides(|var| std::env::var(var).ok())?;

    let table = match std::env::var(STATIONS_ENV) {
        Ok(path) => StationTable::from_path(&path)?,
        Err(_) => yellow_line(),
    };
    info!(
        stations = table.len(),
        first = %table.first(),
        last = %table.last(),
        "Loaded line"
    );
    let table = Arc::new(table);

    let trace_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRACE));
    let trip = Trace::from_path(&trace_path)?;

    let engine = TripProgressEngine::new(Arc::clone(&table), config, PendingNotifications::new());
    let service = TrackerService::spawn(engine);
    let handle = service.handle();

    let driver = BannerDriver::new(Arc::new(LogPresenter), PresentationConfig::default());
    let presenter = spawn_alert_presenter(&handle, driver);

    let outcome = replay(&handle, &table, &trip).await?;
    drop(handle);

    let engine = service.shutdown().await?;
    let snapshot = engine.snapshot();
    let report = serde_json::to_string_pretty(&Report {
        snapshot: &snapshot,
        rejected_steps: outcome.rejections.iter().map(|r| r.step).collect(),
        pending_notifications: engine.gateway().requests().collect(),
    })?;

    // The presenter ends once the engine, and with it the snapshot channel, is gone
    drop(engine);
    let _ = presenter.await;

    println!("{report}");
    Ok(())
}
