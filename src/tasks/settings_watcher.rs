//! Settings file watcher background task

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, SystemTime},
};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::settings::ConfigStore;

/// Background task that reloads the settings file whenever its modification
/// time changes. Read and parse errors keep the previous settings.
pub async fn settings_watch_task(store: Arc<ConfigStore>, path: PathBuf, poll: Duration) {
    info!("Watching settings file {}", path.display());

    let mut last_modified = modified(&path);
    let mut interval = interval(poll);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        let current = modified(&path);
        if current == last_modified {
            continue;
        }
        last_modified = current;

        if current.is_none() {
            warn!("Settings file {} disappeared, keeping current settings", path.display());
            continue;
        }

        debug!("Settings file {} changed, reloading", path.display());
        match store.load_file(&path) {
            Ok(changed) if changed.is_empty() => debug!("Settings file touched without changes"),
            Ok(changed) => info!("Reloaded settings ({} changed)", changed.len()),
            Err(e) => warn!("Keeping current settings: {}", e),
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
