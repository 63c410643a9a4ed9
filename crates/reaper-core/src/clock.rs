//! Time source used to judge instance ages.
use std::sync::Mutex;

use time::{Duration, OffsetDateTime};

/// Provides the current instant.
///
/// The reaper reads it once per group, so every instance in a group is judged against the same
/// instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    at: Mutex<OffsetDateTime>,
}

impl FixedClock {
    pub fn new(at: OffsetDateTime) -> Self {
        Self { at: Mutex::new(at) }
    }

    /// Move the clock to `at`.
    pub fn set(&self, at: OffsetDateTime) {
        if let Ok(mut guard) = self.at.lock() {
            *guard = at;
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.at.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.at
            .lock()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn fixed_clock_holds_still_until_moved() {
        let clock = FixedClock::new(datetime!(2024-05-01 12:00 UTC));
        assert_eq!(clock.now(), clock.now());

        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), datetime!(2024-05-01 12:05 UTC));

        clock.set(datetime!(2025-01-01 00:00 UTC));
        assert_eq!(clock.now(), datetime!(2025-01-01 00:00 UTC));
    }

    #[test]
    fn system_clock_is_utc() {
        assert!(SystemClock.now().offset().is_utc());
    }
}
