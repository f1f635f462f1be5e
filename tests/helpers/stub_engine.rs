use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::recurrence::{
    Calendar, ComponentKind, EngineError, Occurrence, QueryOptions, RecurrenceEngine,
};

enum Failure {
    AlarmDefect(String),
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub kinds: Vec<ComponentKind>,
    pub options: QueryOptions,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Engine double returning fixed occurrence lists per component kind.
#[derive(Default)]
pub struct StubEngine {
    results: HashMap<ComponentKind, Vec<Occurrence>>,
    failures: HashMap<ComponentKind, Failure>,
    calls: RefCell<Vec<RecordedQuery>>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ComponentKind, occurrences: Vec<Occurrence>) -> Self {
        self.results.entry(kind).or_default().extend(occurrences);
        self
    }

    pub fn failing_with_alarm_defect(mut self, kind: ComponentKind, reason: &str) -> Self {
        self.failures
            .insert(kind, Failure::AlarmDefect(reason.to_string()));
        self
    }

    pub fn failing_with_malformed_series(mut self, kind: ComponentKind, uid: &str) -> Self {
        self.failures.insert(kind, Failure::Malformed(uid.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.borrow().clone()
    }
}

impl RecurrenceEngine for StubEngine {
    fn occurrences_between(
        &self,
        _calendar: &Calendar,
        kinds: &[ComponentKind],
        options: QueryOptions,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Occurrence>, EngineError> {
        self.calls.borrow_mut().push(RecordedQuery {
            kinds: kinds.to_vec(),
            options,
            start,
            end,
        });

        let mut occurrences = Vec::new();
        for kind in kinds {
            match self.failures.get(kind) {
                Some(Failure::AlarmDefect(reason)) => {
                    return Err(EngineError::AlarmReadDefect(reason.clone()));
                }
                Some(Failure::Malformed(uid)) => {
                    return Err(EngineError::MalformedSeries {
                        uid: uid.clone(),
                        reason: "stubbed".into(),
                    });
                }
                None => {}
            }
            if let Some(found) = self.results.get(kind) {
                occurrences.extend(found.iter().cloned());
            }
        }
        Ok(occurrences)
    }
}
