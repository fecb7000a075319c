//! The single source of "now" for fetch cycles.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Supplies the current instant. Injected into [`Forecaster`](crate::Forecaster)
/// so that "today" is deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The calendar date at `utc_offset_seconds` east of UTC, or `None` if the
    /// offset is out of range.
    fn today_at(&self, utc_offset_seconds: i32) -> Option<NaiveDate> {
        let offset = FixedOffset::east_opt(utc_offset_seconds)?;
        Some(self.now().with_timezone(&offset).date_naive())
    }
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
