//! Elapsed session time

use std::{fmt, time::Duration};

/// Whole elapsed seconds split into hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ElapsedTime {
    /// Split a number of whole seconds
    pub fn from_secs(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    /// Split a duration, dropping the sub-second part
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_secs(duration.as_secs())
    }

    pub fn total_secs(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_seconds() {
        assert_eq!(ElapsedTime::from_secs(0).to_string(), "0h 0m 0s");
        assert_eq!(ElapsedTime::from_secs(59).to_string(), "0h 0m 59s");
        assert_eq!(ElapsedTime::from_secs(3599).to_string(), "0h 59m 59s");
        assert_eq!(ElapsedTime::from_secs(3661).to_string(), "1h 1m 1s");
        assert_eq!(ElapsedTime::from_secs(90_000).to_string(), "25h 0m 0s");
    }

    #[test]
    fn drops_sub_second_part() {
        let elapsed = ElapsedTime::from_duration(Duration::from_millis(61_999));
        assert_eq!(elapsed, ElapsedTime { hours: 0, minutes: 1, seconds: 1 });
    }

    #[test]
    fn decomposition_holds_across_a_range() {
        for total in (0..200_000).step_by(7) {
            let elapsed = ElapsedTime::from_secs(total);
            assert!(elapsed.minutes < 60);
            assert!(elapsed.seconds < 60);
            assert_eq!(elapsed.hours, total / 3600);
            assert_eq!(elapsed.total_secs(), total);
        }
    }
}
