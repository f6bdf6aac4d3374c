//! Deferred expiry-alert clear

use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::state::AppState;

/// How long the expiry alert stays up before clearing itself
pub const ALERT_FLASH_DURATION: Duration = Duration::from_secs(1);

/// Schedule the one-shot task that clears the expiry alert.
///
/// The handle is stored on the application state so reset can abort a
/// pending clear. A subsequent start leaves the clear in place; the alert
/// still goes away on schedule.
pub fn schedule_alert_reset(state: Arc<AppState>) {
    let task_state = Arc::clone(&state);
    let handle = tokio::spawn(async move {
        sleep(ALERT_FLASH_DURATION).await;
        debug!("Clearing expiry alert");
        if let Err(e) = task_state.clear_alert() {
            warn!("Failed to clear expiry alert: {}", e);
        }
    });

    state.store_alert_reset(handle);
}
