use serde::{Deserialize, Serialize};

use super::alarms::EncodedAlarm;
use super::encode::EncodedOccurrence;

/// The golden output for one calendar file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDocument {
    pub query: FixtureQuery,
    pub result: FixtureResult,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureQuery {
    pub start: String,
    pub end: String,
    /// Calendar path relative to the calendars root, `/` separated.
    #[serde(rename = "calendar-path")]
    pub calendar_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixtureResult {
    /// Reserved; always empty.
    pub calendar: String,
    pub events: Vec<EncodedOccurrence>,
    pub journals: Vec<EncodedOccurrence>,
    pub todos: Vec<EncodedOccurrence>,
    pub alarms: Vec<EncodedAlarm>,
}

/// Stable sort by `start.utc`; equal instants keep engine order.
pub fn sort_by_start(occurrences: &mut [EncodedOccurrence]) {
    occurrences.sort_by(|a, b| a.start.utc.cmp(&b.start.utc));
}
