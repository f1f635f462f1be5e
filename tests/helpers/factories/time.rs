use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::recurrence::TemporalValue;

pub fn date(y: i32, m: u32, d: u32) -> TemporalValue {
    TemporalValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

pub fn floating(y: i32, m: u32, d: u32, h: u32, mi: u32) -> TemporalValue {
    TemporalValue::Floating(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap(),
    )
}

pub fn zoned(tz: Tz, y: i32, m: u32, d: u32, h: u32, mi: u32) -> TemporalValue {
    TemporalValue::Zoned(tz.with_ymd_and_hms(y, m, d, h, mi, 0).single().unwrap())
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32) -> TemporalValue {
    zoned(Tz::UTC, y, m, d, h, mi)
}
