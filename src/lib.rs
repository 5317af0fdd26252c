//! Stretch Timer - elapsed session time and periodic stretch-break reminders
//!
//! This library provides the session clock, the reconfigurable reminder
//! scheduler and the settings store that drives it at runtime.

pub mod config;
pub mod error;
pub mod services;
pub mod settings;
pub mod state;
pub mod tasks;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::ConfigError;
pub use settings::ConfigStore;
pub use state::Session;
pub use utils::signals::shutdown_signal;
