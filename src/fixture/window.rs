use chrono::{DateTime, TimeZone, Utc};

use crate::recurrence::EngineError;

/// 1970-01-01T00:00:00Z
pub const DEFAULT_WINDOW_START: i64 = 0;
/// 2038-01-01T00:00:00Z
pub const DEFAULT_WINDOW_END: i64 = 2_145_916_800;

/// Half-open time range `[start, end)` a fixture is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EngineError> {
        if start >= end {
            return Err(EngineError::InvalidWindow(format!(
                "start {start} is not before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

impl Default for QueryWindow {
    fn default() -> Self {
        let at = |secs| Utc.timestamp_opt(secs, 0).single().unwrap_or_default();
        Self {
            start: at(DEFAULT_WINDOW_START),
            end: at(DEFAULT_WINDOW_END),
        }
    }
}
