//! Status display sinks

use std::io::{self, Write};
use tracing::debug;

/// Receives the formatted elapsed-time string once per second
pub trait DisplaySink: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Redraws a single terminal line on stdout
#[derive(Debug, Default)]
pub struct StatusLine;

impl StatusLine {
    pub fn new() -> Self {
        Self
    }

    /// Finish the status line so later output starts on a fresh line
    pub fn finish(&self) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout);
        let _ = stdout.flush();
    }
}

impl DisplaySink for StatusLine {
    fn set_text(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        // \x1b[2K clears whatever the previous, possibly longer, text left behind
        let _ = write!(stdout, "\r\x1b[2K🕒 {}", text);
        let _ = stdout.flush();
    }
}

/// Sends the elapsed time to the log instead of the terminal
#[derive(Debug, Default)]
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn set_text(&self, text: &str) {
        debug!("Session time: {}", text);
    }
}
