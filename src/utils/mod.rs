//! Process-level helpers
//!
//! Signal handling that lets the binary deactivate the session cleanly.

pub mod signals;

pub use signals::shutdown_signal;
