use std::path::Path;

use chrono::{DateTime, Utc};

use super::calendar::Calendar;
use super::errors::{CalendarError, EngineError};
use super::types::{ComponentKind, Occurrence, QueryOptions};

/// Turns a calendar source file into a [`Calendar`].
pub trait CalendarParser {
    fn parse(&self, path: &Path) -> Result<Calendar, CalendarError>;
}

/// Expands the components of a calendar into concrete occurrences.
///
/// Windows are half-open: `[start, end)`. A query for
/// [`ComponentKind::Alarm`] returns the alarm-bearing occurrences that have at
/// least one trigger inside the window.
pub trait RecurrenceEngine {
    fn occurrences_between(
        &self,
        calendar: &Calendar,
        kinds: &[ComponentKind],
        options: QueryOptions,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Occurrence>, EngineError>;

    fn query<'a>(
        &'a self,
        calendar: &'a Calendar,
        kinds: &'a [ComponentKind],
        options: QueryOptions,
    ) -> Query<'a, Self>
    where
        Self: Sized,
    {
        Query {
            engine: self,
            calendar,
            kinds,
            options,
        }
    }
}

/// A prepared query; call [`Query::between`] to run it over a window.
pub struct Query<'a, E> {
    engine: &'a E,
    calendar: &'a Calendar,
    kinds: &'a [ComponentKind],
    options: QueryOptions,
}

impl<'a, E: RecurrenceEngine> Query<'a, E> {
    pub fn between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Occurrence>, EngineError> {
        self.engine
            .occurrences_between(self.calendar, self.kinds, self.options, start, end)
    }
}
