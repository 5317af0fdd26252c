//! Reminder interval listener background task

use std::sync::{Arc, Mutex};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::{
    settings::{ConfigStore, DEFAULT_REMINDER_MINUTES, REMINDER_INTERVAL_KEY},
    state::ReminderScheduler,
};

/// Read the configured reminder interval.
///
/// A value that is not an integer maps to `-1`, which the scheduler rejects
/// in favour of its last valid interval.
pub fn configured_interval(store: &ConfigStore) -> i64 {
    store
        .get_int(REMINDER_INTERVAL_KEY, DEFAULT_REMINDER_MINUTES)
        .unwrap_or_else(|e| {
            warn!("{}", e);
            -1
        })
}

/// Background task that restarts the reminder timer whenever the reminder
/// interval setting changes. Runs until aborted or the channel closes.
pub async fn reminder_config_task(
    store: Arc<ConfigStore>,
    mut changes: broadcast::Receiver<String>,
    scheduler: Arc<Mutex<ReminderScheduler>>,
) {
    info!("Watching '{}' for changes", REMINDER_INTERVAL_KEY);

    loop {
        match changes.recv().await {
            Ok(key) if key == REMINDER_INTERVAL_KEY => {
                let minutes = configured_interval(&store);
                info!("Reminder interval changed to {} minutes", minutes);
                restart(&scheduler, minutes);
            }
            Ok(key) => {
                debug!("Ignoring change to '{}'", key);
            }
            Err(RecvError::Lagged(skipped)) => {
                // The interval may be among the dropped events
                warn!("Missed {} setting changes, re-reading reminder interval", skipped);
                let minutes = configured_interval(&store);
                let current = scheduler_lock(&scheduler).interval();
                if current.map(|interval| i64::from(interval.minutes())) != Some(minutes) {
                    restart(&scheduler, minutes);
                }
            }
            Err(RecvError::Closed) => {
                debug!("Settings store closed, stopping reminder listener");
                break;
            }
        }
    }
}

fn restart(scheduler: &Mutex<ReminderScheduler>, minutes: i64) {
    scheduler_lock(scheduler).restart(minutes);
}

fn scheduler_lock(scheduler: &Mutex<ReminderScheduler>) -> std::sync::MutexGuard<'_, ReminderScheduler> {
    scheduler.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
