//! Runtime settings module
//!
//! This module holds the settings store the session reads its reminder
//! interval from, plus the helpers to load settings files.

pub mod store;

// Re-export main types
pub use store::{parse_settings, read_settings_file, ConfigStore, Settings};

/// Setting key for the reminder interval, in minutes
pub const REMINDER_INTERVAL_KEY: &str = "stretchTimer.reminderIntervalMinutes";

/// Reminder interval used when nothing valid is configured
pub const DEFAULT_REMINDER_MINUTES: i64 = 60;
