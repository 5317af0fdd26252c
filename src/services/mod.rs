//! Collaborator sinks module
//!
//! This module contains the surfaces the session talks to: the status
//! display and the reminder notifications.

pub mod display;
pub mod notifier;

// Re-export main types
pub use display::{DisplaySink, LogDisplay, StatusLine};
pub use notifier::{check_notify_send_available, DesktopNotifier, LogNotifier, Notifier};
