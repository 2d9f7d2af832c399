// ABOUTME: Injectable time source so date-windowed analytics are deterministic under test
// ABOUTME: Provides SystemClock for production and FixedClock for tests

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the ambient "current time" used by all date-windowed analytics.
///
/// Every engine is generic over a `Clock` so that this-week / this-month /
/// trailing-window calculations can be pinned in tests instead of drifting
/// with the wall clock.
pub trait Clock {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in UTC
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time source used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time source for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
