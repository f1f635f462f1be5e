use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use super::alarms::{AlarmDefectPolicy, AlarmResolver};
use super::document::{FixtureDocument, FixtureQuery, FixtureResult, sort_by_start};
use super::encode::{EncodedOccurrence, encode};
use super::error::FixtureError;
use super::normalize::format_utc;
use super::window::QueryWindow;
use crate::recurrence::{Calendar, ComponentKind, QueryOptions, RecurrenceEngine};
use crate::shared::path::relative_slash_path;

static ISSUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)issue[-_]?(\d+)").expect("issue pattern is valid"));

/// Builds the fixture document of a single calendar.
pub struct FixtureAssembler<'a, E> {
    engine: &'a E,
    window: QueryWindow,
    alarm_policy: AlarmDefectPolicy,
    calendars_root: &'a Path,
}

impl<'a, E: RecurrenceEngine> FixtureAssembler<'a, E> {
    pub fn new(engine: &'a E, window: QueryWindow, calendars_root: &'a Path) -> Self {
        Self {
            engine,
            window,
            alarm_policy: AlarmDefectPolicy::default(),
            calendars_root,
        }
    }

    pub fn with_alarm_policy(mut self, policy: AlarmDefectPolicy) -> Self {
        self.alarm_policy = policy;
        self
    }

    pub fn assemble(
        &self,
        calendar: &Calendar,
        calendar_path: &Path,
    ) -> Result<FixtureDocument, FixtureError> {
        let events = self.occurrences(calendar, ComponentKind::Event)?;
        let journals = self.occurrences(calendar, ComponentKind::Journal)?;
        let todos = self.occurrences(calendar, ComponentKind::Todo)?;
        let alarms = AlarmResolver::new(self.engine, self.alarm_policy).resolve(calendar, &self.window)?;

        info!(
            "{}: {} events, {} journals, {} todos, {} alarms",
            calendar_path.display(),
            events.len(),
            journals.len(),
            todos.len(),
            alarms.len()
        );

        Ok(FixtureDocument {
            query: FixtureQuery {
                start: format_utc(self.window.start),
                end: format_utc(self.window.end),
                calendar_path: relative_slash_path(self.calendars_root, calendar_path),
            },
            result: FixtureResult {
                calendar: String::new(),
                events,
                journals,
                todos,
                alarms,
            },
            description: describe(calendar_path),
        })
    }

    fn occurrences(
        &self,
        calendar: &Calendar,
        kind: ComponentKind,
    ) -> Result<Vec<EncodedOccurrence>, FixtureError> {
        let options = QueryOptions {
            skip_malformed_series: true,
        };
        let kinds = [kind];
        let mut encoded: Vec<EncodedOccurrence> = self
            .engine
            .query(calendar, &kinds, options)
            .between(self.window.start, self.window.end)?
            .iter()
            .map(encode)
            .collect();
        sort_by_start(&mut encoded);
        Ok(encoded)
    }
}

/// Issue number referenced by a calendar file name, e.g. `issue_42.ics`.
pub fn issue_number(calendar_path: &Path) -> Option<u64> {
    let stem = calendar_path.file_stem()?.to_string_lossy();
    ISSUE_RE
        .captures(&stem)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Fixture descriptions are reserved for future annotation and stay empty.
fn describe(calendar_path: &Path) -> String {
    if let Some(issue) = issue_number(calendar_path) {
        debug!("{} references issue #{}", calendar_path.display(), issue);
    }
    String::new()
}
