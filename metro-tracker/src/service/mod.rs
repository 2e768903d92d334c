//! Running the engine as a tokio task.
//!
//! Position fixes, rider actions and alert acknowledgements can come from
//! different tasks. [`TrackerService`] owns the engine and applies commands
//! one at a time in arrival order; [`TrackerHandle`] is the cheap, cloneable
//! way in. Every state change is published on a watch channel.

mod error;
mod present;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::alerts::ActiveAlert;
use crate::domain::{Coordinate, Station, TripError};
use crate::notify::NotificationGateway;
use crate::tracker::{TripPhase, TripProgressEngine, TripSnapshot};

pub use error::ServiceError;
pub use present::spawn_alert_presenter;

/// Commands queued ahead of the engine before senders have to wait.
const COMMAND_BUFFER: usize = 64;

type Reply<T> = oneshot::Sender<T>;

enum Command {
    SelectDestination {
        station: Station,
        reply: Reply<Result<(), TripError>>,
    },
    StartTrip {
        position: Option<Coordinate>,
        reply: Reply<Result<TripPhase, TripError>>,
    },
    Position {
        position: Option<Coordinate>,
        reply: Reply<()>,
    },
    EndTrip {
        reply: Reply<()>,
    },
    CancelAndChooseAgain {
        reply: Reply<()>,
    },
    ClearAlert {
        alert: ActiveAlert,
        reply: Reply<bool>,
    },
}

/// A tracker engine running on its own task.
pub struct TrackerService<G: NotificationGateway> {
    handle: TrackerHandle,
    task: JoinHandle<TripProgressEngine<G>>,
}

impl<G> TrackerService<G>
where
    G: NotificationGateway + Send + 'static,
{
    /// Move `engine` onto a new task. Must be called within a tokio runtime.
    pub fn spawn(mut engine: TripProgressEngine<G>) -> Self {
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshots, snapshot_rx) = watch::channel(engine.snapshot());

        engine.subscribe(move |snapshot: &TripSnapshot| {
            snapshots.send_replace(snapshot.clone());
        });

        let task = tokio::spawn(run(engine, rx));
        Self {
            handle: TrackerHandle {
                commands,
                snapshots: snapshot_rx,
            },
            task,
        }
    }

    /// A new handle to the running tracker.
    pub fn handle(&self) -> TrackerHandle {
        self.handle.clone()
    }

    /// Stop accepting commands and return the engine.
    ///
    /// Waits until every other [`TrackerHandle`] has been dropped.
    pub async fn shutdown(self) -> Result<TripProgressEngine<G>, ServiceError> {
        drop(self.handle);
        self.task.await.map_err(|_| ServiceError::Stopped)
    }
}

async fn run<G: NotificationGateway>(
    mut engine: TripProgressEngine<G>,
    mut rx: mpsc::Receiver<Command>,
) -> TripProgressEngine<G> {
    while let Some(command) = rx.recv().await {
        // A dropped reply receiver only means the caller stopped waiting
        match command {
            Command::SelectDestination { station, reply } => {
                let _ = reply.send(engine.select_destination(&station));
            }
            Command::StartTrip { position, reply } => {
                let _ = reply.send(engine.start_trip(position));
            }
            Command::Position { position, reply } => {
                engine.update_progress(position);
                let _ = reply.send(());
            }
            Command::EndTrip { reply } => {
                engine.end_trip();
                let _ = reply.send(());
            }
            Command::CancelAndChooseAgain { reply } => {
                engine.cancel_and_choose_again();
                let _ = reply.send(());
            }
            Command::ClearAlert { alert, reply } => {
                let _ = reply.send(engine.clear_active_alert(&alert));
            }
        }
    }
    debug!("All tracker handles dropped, stopping");
    engine
}

/// Sends commands to a [`TrackerService`] and observes its state.
///
/// Each method returns once the engine has applied the command.
#[derive(Clone)]
pub struct TrackerHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<TripSnapshot>,
}

impl TrackerHandle {
    pub async fn select_destination(&self, station: Station) -> Result<(), ServiceError> {
        self.request(|reply| Command::SelectDestination { station, reply })
            .await?
            .map_err(ServiceError::from)
    }

    pub async fn start_trip(
        &self,
        position: Option<Coordinate>,
    ) -> Result<TripPhase, ServiceError> {
        self.request(|reply| Command::StartTrip { position, reply })
            .await?
            .map_err(ServiceError::from)
    }

    /// Deliver a position fix, or the absence of one.
    pub async fn update_position(&self, position: Option<Coordinate>) -> Result<(), ServiceError> {
        self.request(|reply| Command::Position { position, reply }).await
    }

    pub async fn end_trip(&self) -> Result<(), ServiceError> {
        self.request(|reply| Command::EndTrip { reply }).await
    }

    pub async fn cancel_and_choose_again(&self) -> Result<(), ServiceError> {
        self.request(|reply| Command::CancelAndChooseAgain { reply })
            .await
    }

    /// Acknowledge that `alert` has been presented.
    ///
    /// Returns false if a newer alert has replaced it in the meantime; that
    /// one is left active.
    pub async fn clear_alert(&self, alert: ActiveAlert) -> Result<bool, ServiceError> {
        self.request(|reply| Command::ClearAlert { alert, reply })
            .await
    }

    /// The most recently published state.
    pub fn snapshot(&self) -> TripSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified of every published state.
    pub fn subscribe(&self) -> watch::Receiver<TripSnapshot> {
        self.snapshots.clone()
    }

    /// A handle that does not keep the tracker alive.
    pub fn downgrade(&self) -> WeakTrackerHandle {
        WeakTrackerHandle {
            commands: self.commands.downgrade(),
            snapshots: self.snapshots.clone(),
        }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, ServiceError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| ServiceError::Stopped)?;
        rx.await.map_err(|_| ServiceError::Stopped)
    }
}

/// A [`TrackerHandle`] that lets the service stop once all strong handles
/// are gone.
#[derive(Clone)]
pub struct WeakTrackerHandle {
    commands: mpsc::WeakSender<Command>,
    snapshots: watch::Receiver<TripSnapshot>,
}

impl WeakTrackerHandle {
    /// A strong handle, if the tracker is still running.
    pub fn upgrade(&self) -> Option<TrackerHandle> {
        Some(TrackerHandle {
            commands: self.commands.upgrade()?,
            snapshots: self.snapshots.clone(),
        })
    }

    /// A receiver that is notified of every published state.
    pub fn subscribe(&self) -> watch::Receiver<TripSnapshot> {
        self.snapshots.clone()
    }
}
