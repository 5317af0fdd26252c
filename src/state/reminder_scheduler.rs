//! Reminder scheduler: periodic stretch-break notifications

use std::{fmt, sync::Arc, time::Duration};
use tracing::{debug, info, warn};

use crate::{
    error::ConfigError,
    services::Notifier,
    settings::DEFAULT_REMINDER_MINUTES,
    tasks::RepeatingTask,
};

/// Message shown on every reminder
pub const STRETCH_MESSAGE: &str = "Time to take a 5-minute stretch break!";

/// Longest accepted interval, one week
pub const MAX_REMINDER_MINUTES: i64 = 7 * 24 * 60;

/// A validated reminder interval in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderInterval(u32);

impl ReminderInterval {
    /// Validate a configured number of minutes
    pub fn new(minutes: i64) -> Result<Self, ConfigError> {
        if (1..=MAX_REMINDER_MINUTES).contains(&minutes) {
            Ok(Self(minutes as u32))
        } else {
            Err(ConfigError::InvalidInterval {
                minutes,
                max: MAX_REMINDER_MINUTES,
            })
        }
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(u64::from(self.0) * 60)
    }
}

impl Default for ReminderInterval {
    fn default() -> Self {
        Self(DEFAULT_REMINDER_MINUTES as u32)
    }
}

impl fmt::Display for ReminderInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.0)
    }
}

/// Scheduler state
#[derive(Debug)]
pub enum ReminderState {
    Stopped,
    Running {
        interval: ReminderInterval,
        timer: RepeatingTask,
    },
}

/// Owns the single reminder timer and rebuilds it when the interval changes
pub struct ReminderScheduler {
    notifier: Arc<dyn Notifier>,
    state: ReminderState,
    /// Last interval that passed validation
    last_valid: ReminderInterval,
    /// Number of timers created so far
    generation: u64,
    /// Set at deactivation; no timer is created afterwards
    closed: bool,
}

impl ReminderScheduler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            state: ReminderState::Stopped,
            last_valid: ReminderInterval::default(),
            generation: 0,
            closed: false,
        }
    }

    /// Start firing reminders every `minutes`.
    ///
    /// Ignored while running. Invalid values fall back to the last valid
    /// interval.
    pub fn start(&mut self, minutes: i64) {
        if self.closed {
            debug!("Reminder scheduler closed, ignoring start");
            return;
        }
        if let ReminderState::Running { interval, .. } = &self.state {
            debug!("Reminder scheduler already running every {}, ignoring start", interval);
            return;
        }

        let interval = self.validate(minutes).unwrap_or(self.last_valid);
        self.spawn(interval);
    }

    /// Stop firing reminders; a no-op when already stopped
    pub fn stop(&mut self) {
        if let ReminderState::Running { interval, timer } =
            std::mem::replace(&mut self.state, ReminderState::Stopped)
        {
            timer.cancel();
            info!("Stopped stretch reminders (was every {})", interval);
        }
    }

    /// Replace the running timer with one firing every `minutes`.
    ///
    /// The old timer is cancelled before the new one exists, and the new one
    /// first fires a full interval from now. Invalid values leave a running
    /// timer untouched.
    pub fn restart(&mut self, minutes: i64) {
        if self.closed {
            debug!("Reminder scheduler closed, ignoring restart");
            return;
        }
        match self.validate(minutes) {
            Some(interval) => {
                self.stop();
                self.spawn(interval);
            }
            None if self.is_running() => {
                warn!("Keeping stretch reminders every {}", self.last_valid);
            }
            None => self.spawn(self.last_valid),
        }
    }

    /// Stop for good: later `start` and `restart` calls are ignored
    pub fn close(&mut self) {
        self.stop();
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ReminderState::Running { .. })
    }

    /// Interval of the running timer
    pub fn interval(&self) -> Option<ReminderInterval> {
        match &self.state {
            ReminderState::Running { interval, .. } => Some(*interval),
            ReminderState::Stopped => None,
        }
    }

    pub fn last_valid(&self) -> ReminderInterval {
        self.last_valid
    }

    /// How many reminder timers have been created
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn validate(&mut self, minutes: i64) -> Option<ReminderInterval> {
        match ReminderInterval::new(minutes) {
            Ok(interval) => {
                self.last_valid = interval;
                Some(interval)
            }
            Err(e) => {
                warn!("Rejecting reminder interval: {}", e);
                None
            }
        }
    }

    fn spawn(&mut self, interval: ReminderInterval) {
        let notifier = Arc::clone(&self.notifier);
        let timer = RepeatingTask::spawn("stretch-reminder", interval.period(), move || {
            notifier.notify(STRETCH_MESSAGE);
        });

        self.generation += 1;
        self.state = ReminderState::Running { interval, timer };
        info!("Stretch reminders every {}", interval);
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingNotifier;
    use tokio::time::sleep;

    const MINUTE: Duration = Duration::from_secs(60);

    fn scheduler() -> (Arc<RecordingNotifier>, ReminderScheduler) {
        let notifier = Arc::new(RecordingNotifier::default());
        let scheduler = ReminderScheduler::new(notifier.clone());
        (notifier, scheduler)
    }

    #[test]
    fn interval_validation() {
        assert!(ReminderInterval::new(1).is_ok());
        assert!(ReminderInterval::new(MAX_REMINDER_MINUTES).is_ok());
        assert!(ReminderInterval::new(0).is_err());
        assert!(ReminderInterval::new(-5).is_err());
        assert!(ReminderInterval::new(MAX_REMINDER_MINUTES + 1).is_err());
        assert_eq!(ReminderInterval::new(2).unwrap().period(), Duration::from_secs(120));
        assert_eq!(ReminderInterval::default().minutes(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn fires_every_interval() {
        let (notifier, mut scheduler) = scheduler();
        scheduler.start(2);
        assert_eq!(scheduler.interval().map(|i| i.minutes()), Some(2));

        sleep(MINUTE * 2 - Duration::from_secs(1)).await;
        assert_eq!(notifier.count(), 0);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(notifier.messages(), vec![STRETCH_MESSAGE]);

        sleep(MINUTE * 4).await;
        assert_eq!(notifier.count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_running_is_ignored() {
        let (_, mut scheduler) = scheduler();
        scheduler.start(5);
        scheduler.start(1);

        assert_eq!(scheduler.interval().map(|i| i.minutes()), Some(5));
        assert_eq!(scheduler.generation(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let (notifier, mut scheduler) = scheduler();
        scheduler.stop();
        scheduler.start(1);
        scheduler.stop();
        scheduler.stop();

        assert!(!scheduler.is_running());
        assert_eq!(scheduler.interval(), None);
        sleep(MINUTE * 5).await;
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_restarts_leave_one_timer() {
        let (notifier, mut scheduler) = scheduler();
        scheduler.start(60);
        scheduler.restart(1);
        scheduler.restart(3);

        assert_eq!(scheduler.interval().map(|i| i.minutes()), Some(3));
        assert_eq!(scheduler.generation(), 3);

        // Neither the 1 minute nor the 60 minute timer survives
        sleep(MINUTE * 3 - Duration::from_secs(1)).await;
        assert_eq!(notifier.count(), 0);
        sleep(MINUTE * 6).await;
        assert_eq!(notifier.count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resets_the_phase() {
        let (notifier, mut scheduler) = scheduler();
        scheduler.start(10);

        sleep(MINUTE * 9).await;
        scheduler.restart(10);

        // The old timer would have fired at 10 minutes
        sleep(MINUTE * 9).await;
        assert_eq!(notifier.count(), 0);
        sleep(MINUTE * 2).await;
        assert_eq!(notifier.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_intervals_keep_the_last_valid_one() {
        let (notifier, mut scheduler) = scheduler();
        scheduler.start(2);

        scheduler.restart(0);
        scheduler.restart(-10);
        assert_eq!(scheduler.interval().map(|i| i.minutes()), Some(2));
        assert_eq!(scheduler.generation(), 1);

        sleep(MINUTE * 2 + Duration::from_secs(1)).await;
        assert_eq!(notifier.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_start_falls_back() {
        let (_, mut scheduler) = scheduler();
        scheduler.start(-1);
        assert_eq!(scheduler.interval(), Some(ReminderInterval::default()));

        scheduler.restart(5);
        scheduler.stop();
        scheduler.restart(0);
        assert_eq!(scheduler.interval().map(|i| i.minutes()), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_scheduler_never_restarts() {
        let (notifier, mut scheduler) = scheduler();
        scheduler.start(1);
        scheduler.close();

        // A listener that was already handling a change when the session
        // shut down must not bring the reminders back
        scheduler.restart(2);
        scheduler.start(2);

        assert!(scheduler.is_closed());
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.generation(), 1);
        sleep(MINUTE * 10).await;
        assert_eq!(notifier.count(), 0);
    }
}
