//! Background tasks module
//!
//! This module contains the timers and listeners that run alongside the
//! session.

pub mod reminder_config;
pub mod repeating;
pub mod settings_watcher;

// Re-export main types and functions
pub use reminder_config::{configured_interval, reminder_config_task};
pub use repeating::RepeatingTask;
pub use settings_watcher::settings_watch_task;
