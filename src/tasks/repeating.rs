//! Cancellable repeating task

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Handle to an action that runs every `period` on the tokio timer.
///
/// The first run happens one full period after spawning. Cancelling (or
/// dropping) the handle guarantees the action never runs again, even when a
/// tick was already due: every run happens under the `live` lock and
/// `cancel` flips the flag under that same lock.
#[derive(Debug)]
pub struct RepeatingTask {
    name: &'static str,
    period: Duration,
    live: Arc<Mutex<bool>>,
    handle: JoinHandle<()>,
}

impl RepeatingTask {
    /// Spawn a repeating action on the current tokio runtime
    pub fn spawn<F>(name: &'static str, period: Duration, mut action: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let live = Arc::new(Mutex::new(true));
        let guard = Arc::clone(&live);
        let first = Instant::now() + period;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let live = guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                if !*live {
                    break;
                }
                action();
            }
        });

        debug!("Spawned repeating task '{}' every {:?}", name, period);
        Self { name, period, live, handle }
    }

    /// Stop the task; no further runs happen once this returns
    pub fn cancel(&self) {
        let mut live = self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if *live {
            *live = false;
            self.handle.abort();
            debug!("Cancelled repeating task '{}'", self.name);
        }
    }

    /// Whether the task can still run
    pub fn is_active(&self) -> bool {
        self.live.lock().map(|live| *live).unwrap_or(false)
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
