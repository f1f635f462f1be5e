use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::recurrence::TemporalValue;

/// Canonical, JSON-safe form of a [`TemporalValue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTime {
    /// ISO-8601 in the value's own shape: date, floating or offset time.
    pub local: String,
    /// The absolute instant, always `+00:00`.
    pub utc: String,
    /// IANA zone of a zoned value, `None` otherwise.
    pub zone: Option<String>,
}

/// Normalizes an optional value; absence stays absent.
pub fn normalize(value: Option<&TemporalValue>) -> Option<NormalizedTime> {
    value.map(normalize_value)
}

pub fn normalize_value(value: &TemporalValue) -> NormalizedTime {
    let local = match value {
        TemporalValue::Date(date) => date.format("%Y-%m-%d").to_string(),
        TemporalValue::Zoned(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, false),
        TemporalValue::Floating(naive) => naive.format("%Y-%m-%dT%H:%M:%S").to_string(),
    };

    NormalizedTime {
        local,
        utc: format_utc(value.to_utc()),
        zone: value.zone().map(|tz| tz.name().to_string()),
    }
}

/// `2024-01-01T10:00:00+00:00`
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, false)
}
