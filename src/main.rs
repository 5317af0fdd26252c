//! Stretch Timer - elapsed session time and stretch-break reminders
//!
//! This is the main entry point for the stretch-timer application.

use std::sync::Arc;
use tracing::{info, warn};

use stretch_timer::{
    config::Config,
    services::{
        check_notify_send_available, DesktopNotifier, DisplaySink, LogDisplay, LogNotifier,
        Notifier, StatusLine,
    },
    settings::{ConfigStore, REMINDER_INTERVAL_KEY},
    state::Session,
    tasks::settings_watch_task,
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the status line owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(format!("stretch_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting stretch-timer v1.0.0");

    let store = Arc::new(ConfigStore::new());
    if let Some(path) = &config.settings {
        let loaded = store.load_file(path)?;
        info!("Loaded {} settings from {}", loaded.len(), path.display());
    }
    if let Some(minutes) = config.reminder_interval {
        store.set_override(REMINDER_INTERVAL_KEY, minutes);
    }

    let notifier: Arc<dyn Notifier> = if config.no_desktop {
        Arc::new(LogNotifier)
    } else {
        match check_notify_send_available().await {
            Ok(()) => Arc::new(DesktopNotifier::new()),
            Err(e) => {
                warn!("{}", e);
                Arc::new(LogNotifier)
            }
        }
    };

    let status_line = (!config.no_status_line).then(|| Arc::new(StatusLine::new()));
    let display: Arc<dyn DisplaySink> = match &status_line {
        Some(status_line) => status_line.clone(),
        None => Arc::new(LogDisplay),
    };

    let mut session = Session::activate(Arc::clone(&store), display, notifier);

    if let Some(path) = config.settings.clone() {
        let watcher = tokio::spawn(settings_watch_task(
            Arc::clone(&store),
            path,
            config.poll_period(),
        ));
        session.register(move || watcher.abort());
    }

    let shutdown = shutdown_signal().await;
    if let Some(status_line) = &status_line {
        status_line.finish();
    }
    if let Err(e) = &shutdown {
        tracing::error!("Signal handling failed: {}", e);
    }
    info!("Shutdown signal received");

    session.deactivate();
    info!("Shutdown complete");
    shutdown.map_err(Into::into)
}
