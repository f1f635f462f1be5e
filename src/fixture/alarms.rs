use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::encode::{EncodedOccurrence, encode};
use super::normalize::{NormalizedTime, normalize_value};
use super::window::QueryWindow;
use crate::recurrence::{
    Calendar, ComponentKind, EngineError, Occurrence, QueryOptions, RecurrenceEngine,
};

/// What to do when the engine hits its alarm read type mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmDefectPolicy {
    /// Log the defect and drop the affected alarms.
    #[default]
    SkipAndLog,
    /// Return the defect to the caller.
    Propagate,
}

/// Fixture record of one fired alarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedAlarm {
    pub trigger: NormalizedTime,
    pub uid: Option<String>,
    pub parent: EncodedOccurrence,
    /// Negation of the engine's acknowledged state for this trigger.
    pub acknowledged: bool,
}

pub struct AlarmResolver<'a, E> {
    engine: &'a E,
    policy: AlarmDefectPolicy,
}

impl<'a, E: RecurrenceEngine> AlarmResolver<'a, E> {
    pub fn new(engine: &'a E, policy: AlarmDefectPolicy) -> Self {
        Self { engine, policy }
    }

    /// Every alarm trigger of `calendar` inside `window`, sorted by UTC
    /// trigger time. Ties keep engine order.
    pub fn resolve(
        &self,
        calendar: &Calendar,
        window: &QueryWindow,
    ) -> Result<Vec<EncodedAlarm>, EngineError> {
        let options = QueryOptions {
            skip_malformed_series: true,
        };
        let kinds = [ComponentKind::Alarm];

        let occurrences = match self
            .engine
            .query(calendar, &kinds, options)
            .between(window.start, window.end)
        {
            Ok(occurrences) => occurrences,
            Err(e) => {
                self.tolerate(e, "alarm query")?;
                return Ok(Vec::new());
            }
        };

        let mut alarms = Vec::new();
        for occurrence in &occurrences {
            match self.encode_alarms(occurrence) {
                Ok(encoded) => alarms.extend(encoded),
                Err(e) => self.tolerate(e, occurrence.uid.as_deref().unwrap_or("<no uid>"))?,
            }
        }

        alarms.sort_by(|a, b| a.trigger.utc.cmp(&b.trigger.utc));
        debug!("Resolved {} alarm triggers", alarms.len());
        Ok(alarms)
    }

    fn encode_alarms(&self, occurrence: &Occurrence) -> Result<Vec<EncodedAlarm>, EngineError> {
        let parent = encode(occurrence);
        let mut encoded = Vec::new();
        for alarm in occurrence.alarms()? {
            for trigger in &alarm.triggers {
                encoded.push(EncodedAlarm {
                    trigger: normalize_value(&trigger.at),
                    uid: alarm.uid.clone(),
                    parent: parent.clone(),
                    acknowledged: !trigger.acknowledged,
                });
            }
        }
        Ok(encoded)
    }

    /// Swallows the alarm read defect under [`AlarmDefectPolicy::SkipAndLog`].
    fn tolerate(&self, error: EngineError, context: &str) -> Result<(), EngineError> {
        match (self.policy, error.is_alarm_read_defect()) {
            (AlarmDefectPolicy::SkipAndLog, true) => {
                warn!(
                    "Skipping alarms of {}: known recurrence engine defect ({})",
                    context, error
                );
                Ok(())
            }
            _ => Err(error),
        }
    }
}
