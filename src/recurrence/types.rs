use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::errors::EngineError;

/// A calendar timestamp in exactly one of the three shapes iCalendar allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalValue {
    /// Calendar date without time of day or zone.
    Date(NaiveDate),
    /// Date and time bound to a timezone.
    Zoned(DateTime<Tz>),
    /// Date and time with no zone, interpreted by convention.
    Floating(NaiveDateTime),
}

impl TemporalValue {
    /// Absolute instant of this value. Dates anchor at midnight UTC and
    /// floating times are read as if they were UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            TemporalValue::Date(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
            TemporalValue::Zoned(dt) => dt.with_timezone(&Utc),
            TemporalValue::Floating(naive) => Utc.from_utc_datetime(naive),
        }
    }

    pub fn zone(&self) -> Option<Tz> {
        match self {
            TemporalValue::Zoned(dt) => Some(dt.timezone()),
            _ => None,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, TemporalValue::Date(_))
    }

    /// Moves the value by `by`, keeping its shape. A date moved by anything
    /// other than whole days becomes a floating time. `None` when the result
    /// leaves the representable range.
    pub fn shifted(&self, by: Duration) -> Option<TemporalValue> {
        match self {
            TemporalValue::Date(date) => {
                if by.num_seconds() % 86_400 == 0 {
                    date.checked_add_signed(Duration::try_days(by.num_days())?)
                        .map(TemporalValue::Date)
                } else {
                    date.and_time(NaiveTime::MIN)
                        .checked_add_signed(by)
                        .map(TemporalValue::Floating)
                }
            }
            TemporalValue::Zoned(dt) => dt.checked_add_signed(by).map(TemporalValue::Zoned),
            TemporalValue::Floating(naive) => {
                naive.checked_add_signed(by).map(TemporalValue::Floating)
            }
        }
    }
}

/// Calendar component kinds a query can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Event,
    Todo,
    Journal,
    Alarm,
}

impl ComponentKind {
    pub fn component_name(&self) -> &'static str {
        match self {
            ComponentKind::Event => "VEVENT",
            ComponentKind::Todo => "VTODO",
            ComponentKind::Journal => "VJOURNAL",
            ComponentKind::Alarm => "VALARM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Drop series whose recurrence rules cannot be expanded instead of
    /// failing the whole query.
    pub skip_malformed_series: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            skip_malformed_series: true,
        }
    }
}

/// One firing time of an alarm.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub at: TemporalValue,
    /// The alarm was already acknowledged at or after this trigger.
    pub acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alarm {
    pub uid: Option<String>,
    pub triggers: Vec<Trigger>,
}

#[derive(Debug, Clone, PartialEq)]
enum AlarmState {
    Resolved(Vec<Alarm>),
    Defective(String),
}

/// One expanded instance of an event, to-do or journal.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub kind: ComponentKind,
    pub uid: Option<String>,
    pub start: TemporalValue,
    pub end: Option<TemporalValue>,
    pub recurrence_id: Option<TemporalValue>,
    pub sequence: Option<i64>,
    alarms: AlarmState,
}

impl Occurrence {
    pub fn new(kind: ComponentKind, start: TemporalValue) -> Self {
        Self {
            kind,
            uid: None,
            start,
            end: None,
            recurrence_id: None,
            sequence: None,
            alarms: AlarmState::Resolved(Vec::new()),
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_end(mut self, end: Option<TemporalValue>) -> Self {
        self.end = end;
        self
    }

    pub fn with_recurrence_id(mut self, recurrence_id: Option<TemporalValue>) -> Self {
        self.recurrence_id = recurrence_id;
        self
    }

    pub fn with_sequence(mut self, sequence: Option<i64>) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_alarms(mut self, alarms: Vec<Alarm>) -> Self {
        self.alarms = AlarmState::Resolved(alarms);
        self
    }

    /// Marks the alarm set as unreadable; `alarms()` will report the defect.
    pub fn with_alarm_defect(mut self, reason: impl Into<String>) -> Self {
        self.alarms = AlarmState::Defective(reason.into());
        self
    }

    pub fn alarms(&self) -> Result<&[Alarm], EngineError> {
        match &self.alarms {
            AlarmState::Resolved(alarms) => Ok(alarms),
            AlarmState::Defective(reason) => Err(EngineError::AlarmReadDefect(reason.clone())),
        }
    }
}
