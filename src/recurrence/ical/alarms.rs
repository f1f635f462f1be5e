use chrono::{DateTime, Duration, Utc};

use super::expander::Instance;
use super::values::{parse_duration, parse_temporal};
use crate::recurrence::calendar::{AlarmComponent, RawProperty};
use crate::recurrence::types::{Alarm, TemporalValue, Trigger};

/// Resolves every VALARM of `instance` to concrete trigger times.
/// Repetitions stop at `until`.
///
/// The error string describes a TRIGGER whose value cannot be read as the
/// type it declares or implies, or that lands outside the representable
/// time range.
pub(super) fn resolve_alarms(
    instance: &Instance<'_>,
    until: DateTime<Utc>,
) -> Result<Vec<Alarm>, String> {
    instance
        .component
        .alarms
        .iter()
        .map(|alarm| resolve_alarm(alarm, instance, until))
        .collect()
}

fn resolve_alarm(
    alarm: &AlarmComponent,
    instance: &Instance<'_>,
    until: DateTime<Utc>,
) -> Result<Alarm, String> {
    let trigger = alarm
        .trigger
        .as_ref()
        .ok_or_else(|| "VALARM without TRIGGER".to_string())?;

    let first = first_trigger(trigger, instance)?;
    let mut times = vec![first];
    if let Some(interval) = alarm.repeat_interval.filter(|i| *i > Duration::zero()) {
        for n in 1..=alarm.repeat {
            let at = i32::try_from(n)
                .ok()
                .and_then(|n| interval.checked_mul(n))
                .and_then(|offset| first.shifted(offset));
            match at {
                Some(at) if at.to_utc() < until => times.push(at),
                Some(_) | None => break,
            }
        }
    }

    let triggers = times
        .into_iter()
        .map(|at| Trigger {
            at,
            acknowledged: alarm.acknowledged.is_some_and(|ack| ack >= at.to_utc()),
        })
        .collect();

    Ok(Alarm {
        uid: alarm.uid.clone(),
        triggers,
    })
}

fn first_trigger(trigger: &RawProperty, instance: &Instance<'_>) -> Result<TemporalValue, String> {
    let declared = trigger.param("VALUE").map(str::to_ascii_uppercase);

    match declared.as_deref() {
        Some("DATE-TIME") => parse_temporal(trigger)
            .map_err(|e| format!("TRIGGER declared DATE-TIME but {e}")),
        Some("DURATION") | None => {
            let offset = parse_duration(trigger.value()).ok_or_else(|| {
                format!("TRIGGER expected DURATION, got '{}'", trigger.value())
            })?;
            relative_trigger(trigger, instance, offset)
        }
        Some(other) => Err(format!("TRIGGER has unsupported VALUE={other}")),
    }
}

fn relative_trigger(
    trigger: &RawProperty,
    instance: &Instance<'_>,
    offset: Duration,
) -> Result<TemporalValue, String> {
    let related_to_end = trigger
        .param("RELATED")
        .is_some_and(|r| r.eq_ignore_ascii_case("END"));

    let anchor = if related_to_end {
        instance
            .end
            .ok_or_else(|| "TRIGGER RELATED=END on a component without an end".to_string())?
    } else {
        instance.start
    };
    anchor
        .shifted(offset)
        .ok_or_else(|| format!("TRIGGER offset {offset} is out of range"))
}

/// How far before or after an instance its alarms can fire, saturating at
/// [`Duration::MAX`]. Unreadable triggers contribute nothing here; they are
/// reported when read.
pub(super) fn alarm_reach(alarms: &[AlarmComponent]) -> Duration {
    alarms
        .iter()
        .map(|alarm| {
            let offset = alarm
                .trigger
                .as_ref()
                .and_then(|t| parse_duration(t.value()))
                .map(magnitude)
                .unwrap_or_else(Duration::zero);
            let repeats = match alarm.repeat_interval {
                Some(interval) => i32::try_from(alarm.repeat)
                    .ok()
                    .and_then(|n| magnitude(interval).checked_mul(n))
                    .unwrap_or(Duration::MAX),
                None => Duration::zero(),
            };
            offset.checked_add(&repeats).unwrap_or(Duration::MAX)
        })
        .max()
        .unwrap_or_else(Duration::zero)
}

fn magnitude(duration: Duration) -> Duration {
    if duration < Duration::zero() {
        -duration
    } else {
        duration
    }
}
