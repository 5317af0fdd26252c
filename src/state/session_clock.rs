//! Session clock: elapsed time on a one-second cadence

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use chrono::{DateTime, Local, Utc};
use tokio::time::Instant;
use tracing::{debug, info};

use super::ElapsedTime;
use crate::{services::DisplaySink, tasks::RepeatingTask};

/// How often the display is refreshed
pub const CLOCK_TICK: Duration = Duration::from_secs(1);

/// When the session started
#[derive(Debug, Clone, Copy)]
pub struct SessionStart {
    /// Monotonic reference used for elapsed time
    pub instant: Instant,
    /// Wall-clock time, for logs
    pub wall: DateTime<Utc>,
}

impl SessionStart {
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            wall: Utc::now(),
        }
    }
}

/// Tracks the session start and pushes the elapsed time to the display
pub struct SessionClock {
    display: Arc<dyn DisplaySink>,
    start: Arc<Mutex<Option<SessionStart>>>,
    ticker: Option<RepeatingTask>,
}

impl SessionClock {
    pub fn new(display: Arc<dyn DisplaySink>) -> Self {
        Self {
            display,
            start: Arc::new(Mutex::new(None)),
            ticker: None,
        }
    }

    /// Record the start time and begin refreshing the display every second
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            debug!("Session clock already running");
            return;
        }

        let start = SessionStart::now();
        *lock(&self.start) = Some(start);
        info!(
            "Session started at {}",
            start.wall.with_timezone(&Local).format("%H:%M:%S")
        );

        let shared_start = Arc::clone(&self.start);
        let display = Arc::clone(&self.display);
        self.ticker = Some(RepeatingTask::spawn("session-clock", CLOCK_TICK, move || {
            if let Some(elapsed) = elapsed_since(&shared_start) {
                display.set_text(&elapsed.to_string());
            }
        }));
    }

    /// Cancel the display refresh and clear the start time
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
            if let Some(elapsed) = self.elapsed() {
                info!("Session ended after {}", elapsed);
            }
        }
        *lock(&self.start) = None;
    }

    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(RepeatingTask::is_active)
    }

    /// Elapsed session time, if the clock is running
    pub fn elapsed(&self) -> Option<ElapsedTime> {
        elapsed_since(&self.start)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        lock(&self.start).as_ref().map(|start| start.wall)
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.stop();
    }
}

fn elapsed_since(start: &Mutex<Option<SessionStart>>) -> Option<ElapsedTime> {
    lock(start)
        .as_ref()
        .map(|start| ElapsedTime::from_duration(start.instant.elapsed()))
}

fn lock(start: &Mutex<Option<SessionStart>>) -> std::sync::MutexGuard<'_, Option<SessionStart>> {
    start.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingDisplay;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn renders_elapsed_time_every_second() {
        let display = Arc::new(RecordingDisplay::default());
        let mut clock = SessionClock::new(display.clone());
        clock.start();
        assert!(clock.is_running());
        assert!(clock.started_at().is_some());

        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(display.texts(), vec!["0h 0m 1s", "0h 0m 2s", "0h 0m 3s"]);

        sleep(Duration::from_secs(3_658)).await;
        assert_eq!(display.last().as_deref(), Some("1h 1m 1s"));
        assert_eq!(clock.elapsed(), Some(ElapsedTime::from_secs(3_661)));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_updates_and_clears_start() {
        let display = Arc::new(RecordingDisplay::default());
        let mut clock = SessionClock::new(display.clone());
        clock.start();

        sleep(Duration::from_millis(2_500)).await;
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(), None);
        assert_eq!(clock.started_at(), None);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(display.texts().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_start_once() {
        let display = Arc::new(RecordingDisplay::default());
        let mut clock = SessionClock::new(display.clone());
        clock.stop();
        assert!(!clock.is_running());

        clock.start();
        sleep(Duration::from_millis(1_500)).await;
        // A second start must not reset the start time or add a timer
        clock.start();
        sleep(Duration::from_secs(1)).await;

        assert_eq!(display.texts(), vec!["0h 0m 1s", "0h 0m 2s"]);
        clock.stop();
        clock.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn unset_start_is_a_no_op() {
        let display = Arc::new(RecordingDisplay::default());
        let mut clock = SessionClock::new(display.clone());
        clock.start();
        *lock(&clock.start) = None;

        sleep(Duration::from_secs(3)).await;
        assert!(display.texts().is_empty());
    }
}
