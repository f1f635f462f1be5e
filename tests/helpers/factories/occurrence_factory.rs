use chrono::Duration;

use super::time::utc;
use crate::recurrence::{Alarm, ComponentKind, Occurrence, TemporalValue};

pub struct OccurrenceFactory {
    kind: ComponentKind,
    uid: Option<String>,
    start: TemporalValue,
    end: Option<TemporalValue>,
    recurrence_id: Option<TemporalValue>,
    sequence: Option<i64>,
    alarms: Vec<Alarm>,
    alarm_defect: Option<String>,
}

impl OccurrenceFactory {
    pub fn new() -> Self {
        let start = utc(2024, 1, 1, 10, 0);
        Self {
            kind: ComponentKind::Event,
            uid: Some("e1".into()),
            start,
            end: start.shifted(Duration::hours(1)),
            recurrence_id: None,
            sequence: None,
            alarms: Vec::new(),
            alarm_defect: None,
        }
    }

    pub fn kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn uid(mut self, uid: &str) -> Self {
        self.uid = Some(uid.to_string());
        self
    }

    pub fn without_uid(mut self) -> Self {
        self.uid = None;
        self
    }

    /// Moves the start, keeping the current length.
    pub fn starting(mut self, start: TemporalValue) -> Self {
        let length = self.end.map(|end| end.to_utc() - self.start.to_utc());
        self.start = start;
        self.end = length.and_then(|l| start.shifted(l));
        self
    }

    pub fn end(mut self, end: Option<TemporalValue>) -> Self {
        self.end = end;
        self
    }

    pub fn recurrence_id(mut self, recurrence_id: TemporalValue) -> Self {
        self.recurrence_id = Some(recurrence_id);
        self
    }

    pub fn sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn alarm(mut self, alarm: Alarm) -> Self {
        self.alarms.push(alarm);
        self
    }

    pub fn alarm_defect(mut self, reason: &str) -> Self {
        self.alarm_defect = Some(reason.to_string());
        self
    }

    pub fn create(self) -> Occurrence {
        let mut occurrence = Occurrence::new(self.kind, self.start)
            .with_end(self.end)
            .with_recurrence_id(self.recurrence_id)
            .with_sequence(self.sequence)
            .with_alarms(self.alarms);
        if let Some(uid) = self.uid {
            occurrence = occurrence.with_uid(uid);
        }
        if let Some(reason) = self.alarm_defect {
            occurrence = occurrence.with_alarm_defect(reason);
        }
        occurrence
    }
}
