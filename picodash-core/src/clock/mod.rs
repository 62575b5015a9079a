//! Wall clock
//!
//! The device has no time source of its own. The clock is a configured
//! Unix time at boot plus uptime, shifted by a fixed UTC offset.

mod civil;

pub use civil::{DateTime, Weekday};

use crate::config::ClockConfig;

/// Converts uptime into local civil time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    epoch_s: u32,
    utc_offset_min: i16,
}

impl WallClock {
    /// Create a new wall clock
    pub const fn new(epoch_s: u32, utc_offset_min: i16) -> Self {
        Self {
            epoch_s,
            utc_offset_min,
        }
    }

    /// Create a wall clock from the `[clock]` configuration
    pub fn from_config(config: &ClockConfig) -> Self {
        Self::new(config.epoch_s, config.utc_offset_min)
    }

    /// Local time `uptime_ms` after boot
    pub fn now(&self, uptime_ms: u64) -> DateTime {
        let secs = self.epoch_s as i64
            + (uptime_ms / 1000) as i64
            + self.utc_offset_min as i64 * 60;
        DateTime::from_unix(secs)
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::from_config(&ClockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_epoch() {
        let now = WallClock::default().now(0);
        assert_eq!((now.year, now.month, now.day), (2021, 1, 1));
        assert_eq!((now.hour, now.minute, now.second), (0, 0, 0));
        assert_eq!(now.weekday, Weekday::Friday);
    }

    #[test]
    fn test_uptime_advances() {
        let clock = WallClock::new(1_609_459_200, 0);
        let now = clock.now(3_723_999);
        assert_eq!((now.hour, now.minute, now.second), (1, 2, 3));
    }

    #[test]
    fn test_utc_offset() {
        // UTC-05:00 puts midnight UTC on the previous day
        let clock = WallClock::new(1_609_459_200, -300);
        let now = clock.now(0);
        assert_eq!((now.year, now.month, now.day), (2020, 12, 31));
        assert_eq!(now.hour, 19);
        assert_eq!(now.weekday, Weekday::Thursday);
    }
}
