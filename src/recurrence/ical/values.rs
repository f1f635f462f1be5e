use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::recurrence::calendar::RawProperty;
use crate::recurrence::types::TemporalValue;

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-])?P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("duration pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("missing value")]
    Missing,

    #[error("'{0}' is not a DATE or DATE-TIME")]
    NotATime(String),

    #[error("'{0}' is not a DURATION")]
    NotADuration(String),

    #[error("'{0}' is not an INTEGER")]
    NotAnInteger(String),
}

/// Parses an RFC 5545 DURATION such as `-PT15M` or `P1W`. Values too large
/// for a [`Duration`] are rejected.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let caps = DURATION_RE.captures(input.trim())?;
    if (2..=6).all(|i| caps.get(i).is_none()) {
        return None;
    }

    let part = |i: usize, unit: fn(i64) -> Option<Duration>| -> Option<Duration> {
        match caps.get(i) {
            Some(m) => unit(m.as_str().parse().ok()?),
            None => Some(Duration::zero()),
        }
    };

    let total = part(2, Duration::try_weeks)?
        .checked_add(&part(3, Duration::try_days)?)?
        .checked_add(&part(4, Duration::try_hours)?)?
        .checked_add(&part(5, Duration::try_minutes)?)?
        .checked_add(&part(6, Duration::try_seconds)?)?;

    match caps.get(1).map(|m| m.as_str()) {
        Some("-") => Some(-total),
        _ => Some(total),
    }
}

pub fn parse_duration_property(prop: &RawProperty) -> Result<Duration, ValueError> {
    let value = prop.value();
    if value.is_empty() {
        return Err(ValueError::Missing);
    }
    parse_duration(value).ok_or_else(|| ValueError::NotADuration(value.to_string()))
}

pub fn parse_integer_property(prop: &RawProperty) -> Result<i64, ValueError> {
    let value = prop.value();
    value
        .parse()
        .map_err(|_| ValueError::NotAnInteger(value.to_string()))
}

/// Decodes a single DATE or DATE-TIME value honouring `VALUE` and `TZID`.
pub fn parse_temporal(prop: &RawProperty) -> Result<TemporalValue, ValueError> {
    let value = prop.value();
    if value.is_empty() {
        return Err(ValueError::Missing);
    }
    parse_temporal_text(value, prop)
}

/// Decodes a comma separated DATE / DATE-TIME list (RDATE, EXDATE).
/// PERIOD values contribute their start.
pub fn parse_temporal_list(prop: &RawProperty) -> Result<Vec<TemporalValue>, ValueError> {
    prop.value()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let start = item.split('/').next().unwrap_or(item);
            parse_temporal_text(start, prop)
        })
        .collect()
}

fn parse_temporal_text(value: &str, prop: &RawProperty) -> Result<TemporalValue, ValueError> {
    let is_date = prop
        .param("VALUE")
        .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
        || value.len() == 8;

    if is_date {
        return NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(TemporalValue::Date)
            .map_err(|_| ValueError::NotATime(value.to_string()));
    }

    if let Some(utc) = value.strip_suffix('Z') {
        let naive = parse_naive(utc)?;
        return Ok(TemporalValue::Zoned(Tz::UTC.from_utc_datetime(&naive)));
    }

    let naive = parse_naive(value)?;
    match prop.param("TZID") {
        Some(tzid) => Ok(localize(naive, tzid)),
        None => Ok(TemporalValue::Floating(naive)),
    }
}

fn parse_naive(value: &str) -> Result<NaiveDateTime, ValueError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .map_err(|_| ValueError::NotATime(value.to_string()))
}

/// Binds a wall-clock time to an IANA zone. Unknown zones fall back to a
/// floating value; times inside a DST gap move forward by the gap.
pub fn localize(naive: NaiveDateTime, tzid: &str) -> TemporalValue {
    let tz: Tz = match tzid.trim_start_matches('/').parse() {
        Ok(tz) => tz,
        Err(_) => {
            warn!("Unknown TZID '{}', treating {} as floating", tzid, naive);
            return TemporalValue::Floating(naive);
        }
    };

    let resolved = tz
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            let later = naive.checked_add_signed(Duration::hours(1))?;
            tz.from_local_datetime(&later).earliest()
        });

    match resolved {
        Some(dt) => TemporalValue::Zoned(dt),
        None => TemporalValue::Floating(naive),
    }
}

/// Formats an instant the way RRULE `UNTIL` and `DTSTART` expect UTC values.
pub fn format_utc_compact(naive_utc: NaiveDateTime) -> String {
    format!("{}Z", naive_utc.format(DATE_TIME_FORMAT))
}

pub fn format_compact(naive: NaiveDateTime) -> String {
    naive.format(DATE_TIME_FORMAT).to_string()
}

/// Reads an RRULE `UNTIL` value in the frame of the series start.
pub fn parse_until(value: &str, start: &TemporalValue) -> Option<NaiveDateTime> {
    if let Some(utc) = value.strip_suffix('Z') {
        return NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT).ok();
    }

    let naive = if value.len() == 8 {
        let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
        match start {
            TemporalValue::Date(_) => date.and_hms_opt(0, 0, 0)?,
            _ => date.and_hms_opt(23, 59, 59)?,
        }
    } else {
        NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).ok()?
    };

    match start {
        TemporalValue::Zoned(dt) => dt
            .timezone()
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc).naive_utc()),
        _ => Some(naive),
    }
}
