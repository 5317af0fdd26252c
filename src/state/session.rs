//! Session lifecycle: activation, cleanup registration and deactivation

use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::{ReminderScheduler, SessionClock};
use crate::{
    services::{DisplaySink, Notifier},
    settings::ConfigStore,
    tasks::{configured_interval, reminder_config_task},
};

type Cleanup = Box<dyn FnOnce() + Send>;

/// Everything that lives between activation and deactivation
pub struct Session {
    clock: Arc<Mutex<SessionClock>>,
    scheduler: Arc<Mutex<ReminderScheduler>>,
    store: Arc<ConfigStore>,
    cleanups: Vec<Cleanup>,
}

impl Session {
    /// Start the clock and the reminders and subscribe to setting changes
    pub fn activate(
        store: Arc<ConfigStore>,
        display: Arc<dyn DisplaySink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        info!("Activating stretch timer session");

        let mut clock = SessionClock::new(display);
        clock.start();
        let clock = Arc::new(Mutex::new(clock));

        let mut scheduler = ReminderScheduler::new(notifier);
        scheduler.start(configured_interval(&store));
        let scheduler = Arc::new(Mutex::new(scheduler));

        // Subscribe before spawning so no change between here and the first
        // poll is lost
        let listener = tokio::spawn(reminder_config_task(
            Arc::clone(&store),
            store.subscribe(),
            Arc::clone(&scheduler),
        ));

        let mut session = Self {
            clock: Arc::clone(&clock),
            scheduler: Arc::clone(&scheduler),
            store,
            cleanups: Vec::new(),
        };

        session.register(move || {
            lock(&clock).stop();
        });
        session.register(move || {
            lock(&scheduler).close();
        });
        session.register(move || listener.abort());
        session
    }

    /// Register a callback that runs once at deactivation
    pub fn register<F>(&mut self, cleanup: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cleanups.push(Box::new(cleanup));
    }

    /// Run every cleanup, most recently registered first
    pub fn deactivate(&mut self) {
        if self.cleanups.is_empty() {
            return;
        }

        info!("Deactivating stretch timer session");
        while let Some(cleanup) = self.cleanups.pop() {
            cleanup();
        }
        debug!("All session resources released");
    }

    pub fn is_active(&self) -> bool {
        !self.cleanups.is_empty()
    }

    pub fn clock(&self) -> &Arc<Mutex<SessionClock>> {
        &self.clock
    }

    pub fn scheduler(&self) -> &Arc<Mutex<ReminderScheduler>> {
        &self.scheduler
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.deactivate();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
