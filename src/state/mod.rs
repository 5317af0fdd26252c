//! Session state module
//!
//! This module contains the session clock, the reminder scheduler and the
//! session that ties their lifecycles together.

pub mod elapsed;
pub mod reminder_scheduler;
pub mod session;
pub mod session_clock;

// Re-export main types
pub use elapsed::ElapsedTime;
pub use reminder_scheduler::{
    ReminderInterval, ReminderScheduler, ReminderState, MAX_REMINDER_MINUTES, STRETCH_MESSAGE,
};
pub use session::Session;
pub use session_clock::{SessionClock, SessionStart, CLOCK_TICK};
