//! Turning published alerts into banners.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::alerts::{AlertPresenter, BannerDriver};

use super::TrackerHandle;

/// Present every alert the tracker raises, then acknowledge it.
///
/// The task holds only a weak handle, so it ends on its own once the
/// tracker shuts down.
pub fn spawn_alert_presenter<P: AlertPresenter>(
    handle: &TrackerHandle,
    mut driver: BannerDriver<P>,
) -> JoinHandle<()> {
    let weak = handle.downgrade();
    let mut snapshots = weak.subscribe();

    tokio::spawn(async move {
        loop {
            let alert = snapshots.borrow_and_update().active_alert.clone();
            if let Some(alert) = alert {
                driver.present(&alert);
                let Some(handle) = weak.upgrade() else {
                    break;
                };
                // A newer alert stays active and shows up on the next change
                if handle.clear_alert(alert).await.is_err() {
                    break;
                }
            }
            if snapshots.changed().await.is_err() {
                break;
            }
        }
        debug!("Alert presenter stopped");
    })
}
