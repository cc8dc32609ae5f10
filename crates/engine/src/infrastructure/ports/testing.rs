//! Testability ports for injecting time.

use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// History entries are stamped in milliseconds since the Unix epoch.
pub fn history_timestamp(clock: &dyn ClockPort) -> i64 {
    clock.now().timestamp_millis()
}
