//! Reminder notification sinks

use tokio::process::Command;
use tracing::{debug, info, warn};

/// Title used for desktop notifications
pub const NOTIFICATION_TITLE: &str = "Stretch Timer";

/// Shows a one-shot informational message to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Writes reminders to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("🔔 {}", message);
    }
}

/// Delivers reminders through `notify-send`, falling back to the log
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        let message = message.to_string();
        tokio::spawn(async move {
            if let Err(e) = send_desktop_notification(&message).await {
                warn!("Desktop notification failed: {}", e);
                LogNotifier.notify(&message);
            }
        });
    }
}

/// Run `notify-send` with the reminder message
pub async fn send_desktop_notification(message: &str) -> Result<(), String> {
    debug!("Sending desktop notification: {}", message);

    let output = Command::new("notify-send")
        .args(["--app-name", NOTIFICATION_TITLE, NOTIFICATION_TITLE, message])
        .output()
        .await
        .map_err(|e| format!("Failed to execute notify-send: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("notify-send failed: {}", stderr));
    }

    info!("Reminder delivered: {}", message);
    Ok(())
}

/// Check if notify-send is available on the system
pub async fn check_notify_send_available() -> Result<(), String> {
    let output = Command::new("notify-send")
        .arg("--version")
        .output()
        .await
        .map_err(|_| "notify-send is not available, reminders go to the log".to_string())?;

    if !output.status.success() {
        return Err("notify-send --version failed, reminders go to the log".to_string());
    }

    info!("notify-send is available");
    Ok(())
}
