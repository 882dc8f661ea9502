//! Clock abstraction for the match scheduler.
//!
//! The scheduler never reads wall-clock time directly: it asks an injected
//! `Clock`, so tests can advance time explicitly instead of sleeping.

use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests and offline simulation runs.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: RwLock::new(start) }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        *self.now.write().expect("ManualClock lock poisoned") = t;
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.write().expect("ManualClock lock poisoned");
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().expect("ManualClock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start + Duration::minutes(5));

        let later = start + Duration::hours(2);
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
