//! Injectable clock for deterministic timestamps.
//!
//! The store and the models stamp records with `created_at`/`updated_at`
//! values. Taking the time through a trait instead of calling `Utc::now()`
//! directly keeps those operations deterministic under test.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Creates a clock pinned to the given RFC 3339 timestamp.
    ///
    /// # Panics
    ///
    /// Panics if the timestamp does not parse; intended for test setup only.
    #[must_use]
    pub fn at(rfc3339: &str) -> Self {
        Self(
            DateTime::parse_from_rfc3339(rfc3339)
                .expect("invalid RFC 3339 timestamp")
                .with_timezone(&Utc),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
