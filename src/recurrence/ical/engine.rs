use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::alarms::{alarm_reach, resolve_alarms};
use super::expander::{Instance, expand_series, group_series, instance_length};
use crate::recurrence::calendar::Calendar;
use crate::recurrence::errors::EngineError;
use crate::recurrence::traits::RecurrenceEngine;
use crate::recurrence::types::{ComponentKind, Occurrence, QueryOptions};

/// Expansion past the window end for alarm queries never goes further than
/// this, however far a trigger reaches.
const MAX_ALARM_HORIZON_DAYS: i64 = 366 * 10;

/// Recurrence engine backed by the `rrule` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcalEngine;

impl RecurrenceEngine for IcalEngine {
    fn occurrences_between(
        &self,
        calendar: &Calendar,
        kinds: &[ComponentKind],
        options: QueryOptions,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Occurrence>, EngineError> {
        if start >= end {
            return Err(EngineError::InvalidWindow(format!(
                "start {start} is not before end {end}"
            )));
        }

        let mut occurrences = Vec::new();
        for kind in kinds {
            match kind {
                ComponentKind::Alarm => {
                    for owner in [ComponentKind::Event, ComponentKind::Todo] {
                        occurrences.extend(alarm_occurrences(calendar, owner, options, start, end)?);
                    }
                }
                other => {
                    let instances = expand_kind(calendar, *other, options, end)?;
                    occurrences.extend(
                        instances
                            .iter()
                            .filter(|i| overlaps(i, start, end))
                            .map(|i| to_occurrence(i, end)),
                    );
                }
            }
        }

        debug!(
            "Engine returned {} occurrences for {:?} in [{}, {})",
            occurrences.len(),
            kinds,
            start,
            end
        );
        Ok(occurrences)
    }
}

fn expand_kind(
    calendar: &Calendar,
    kind: ComponentKind,
    options: QueryOptions,
    until: DateTime<Utc>,
) -> Result<Vec<Instance<'_>>, EngineError> {
    let mut instances = Vec::new();
    for series in group_series(calendar.components_of(kind)) {
        match expand_series(&series, until) {
            Ok(expanded) => instances.extend(expanded),
            Err(reason) if options.skip_malformed_series => {
                warn!(
                    uid = %series.uid(),
                    "Skipping malformed recurrence series: {}", reason
                );
            }
            Err(reason) => {
                return Err(EngineError::MalformedSeries {
                    uid: series.uid(),
                    reason,
                });
            }
        }
    }
    Ok(instances)
}

/// Occurrences of `owner` components whose alarms fire inside the window.
/// Each returned occurrence only lists the in-window triggers. Occurrences
/// with an unreadable alarm are returned when they overlap the window so the
/// caller sees the defect on read.
fn alarm_occurrences(
    calendar: &Calendar,
    owner: ComponentKind,
    options: QueryOptions,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Occurrence>, EngineError> {
    let reach = calendar
        .components_of(owner)
        .filter(|c| !c.alarms.is_empty())
        .map(|c| {
            let length = instance_length(c).unwrap_or_else(Duration::zero);
            alarm_reach(&c.alarms)
                .checked_add(&length)
                .unwrap_or(Duration::MAX)
        })
        .max();
    let Some(reach) = reach else {
        return Ok(Vec::new());
    };
    let horizon = end
        .checked_add_signed(reach.min(Duration::days(MAX_ALARM_HORIZON_DAYS)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut occurrences = Vec::new();
    for instance in expand_kind(calendar, owner, options, horizon)? {
        if instance.component.alarms.is_empty() {
            continue;
        }

        match resolve_alarms(&instance, end) {
            Ok(mut alarms) => {
                for alarm in alarms.iter_mut() {
                    alarm.triggers.retain(|t| {
                        let at = t.at.to_utc();
                        at >= start && at < end
                    });
                }
                alarms.retain(|a| !a.triggers.is_empty());
                if !alarms.is_empty() {
                    occurrences.push(base_occurrence(&instance).with_alarms(alarms));
                }
            }
            Err(reason) => {
                if overlaps(&instance, start, end) {
                    occurrences.push(base_occurrence(&instance).with_alarm_defect(reason));
                }
            }
        }
    }
    Ok(occurrences)
}

/// Half-open overlap; zero-length instances count when they start inside.
fn overlaps(instance: &Instance<'_>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    let (first, last) = instance.span_utc();
    if last > first {
        first < end && last > start
    } else {
        first >= start && first < end
    }
}

fn base_occurrence(instance: &Instance<'_>) -> Occurrence {
    let component = instance.component;
    let occurrence = Occurrence::new(component.kind, instance.start)
        .with_end(instance.end)
        .with_recurrence_id(instance.recurrence_id)
        .with_sequence(component.sequence);
    match &component.uid {
        Some(uid) => occurrence.with_uid(uid.clone()),
        None => occurrence,
    }
}

fn to_occurrence(instance: &Instance<'_>, until: DateTime<Utc>) -> Occurrence {
    let occurrence = base_occurrence(instance);
    match resolve_alarms(instance, until) {
        Ok(alarms) => occurrence.with_alarms(alarms),
        Err(reason) => occurrence.with_alarm_defect(reason),
    }
}
