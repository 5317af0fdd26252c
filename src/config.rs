//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "stretch-timer")]
#[command(about = "Shows elapsed session time and reminds you to take stretch breaks")]
#[command(version = "1.0.0")]
pub struct Config {
    /// JSON settings file, watched for changes while running
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Reminder interval in minutes; wins over the settings file, even after reloads
    #[arg(short, long, allow_negative_numbers = true)]
    pub reminder_interval: Option<i64>,

    /// How often the settings file is checked for changes, in seconds
    #[arg(long, default_value = "2")]
    pub poll_interval: u64,

    /// Log the elapsed time instead of drawing a status line
    #[arg(long)]
    pub no_status_line: bool,

    /// Never use desktop notifications
    #[arg(long)]
    pub no_desktop: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Settings poll cadence, never below one second
    pub fn poll_period(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
