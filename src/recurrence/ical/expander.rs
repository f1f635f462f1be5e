use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rrule::RRuleSet;
use tracing::debug;

use super::values::{format_compact, format_utc_compact, parse_until};
use crate::recurrence::calendar::Component;
use crate::recurrence::types::{ComponentKind, TemporalValue};

/// One concrete instance of a series before it is windowed.
#[derive(Debug, Clone)]
pub(super) struct Instance<'c> {
    pub component: &'c Component,
    pub start: TemporalValue,
    pub end: Option<TemporalValue>,
    pub recurrence_id: Option<TemporalValue>,
}

impl Instance<'_> {
    pub fn span_utc(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start.to_utc();
        let end = self.end.map(|e| e.to_utc()).unwrap_or(start);
        (start, end.max(start))
    }
}

/// A master component together with the overrides that share its UID.
#[derive(Debug, Default)]
pub(super) struct Series<'c> {
    pub master: Option<&'c Component>,
    pub overrides: Vec<&'c Component>,
}

impl Series<'_> {
    pub fn uid(&self) -> String {
        self.master
            .or_else(|| self.overrides.first().copied())
            .and_then(|c| c.uid.clone())
            .unwrap_or_default()
    }
}

/// Groups components into series by (kind, UID), keeping first-seen order.
/// Components without a UID each form their own series.
pub(super) fn group_series<'c>(components: impl Iterator<Item = &'c Component>) -> Vec<Series<'c>> {
    let mut series: Vec<Series<'c>> = Vec::new();
    let mut index: HashMap<(ComponentKind, &'c str), usize> = HashMap::new();

    for component in components {
        let slot = match component.uid.as_deref() {
            Some(uid) => *index.entry((component.kind, uid)).or_insert_with(|| {
                series.push(Series::default());
                series.len() - 1
            }),
            None => {
                series.push(Series::default());
                series.len() - 1
            }
        };

        let entry = &mut series[slot];
        if component.is_override() || (entry.master.is_some() && component.uid.is_some()) {
            entry.overrides.push(component);
        } else {
            entry.master = Some(component);
        }
    }

    series
}

/// Start of a component; to-dos without DTSTART start at their DUE.
fn effective_start(component: &Component) -> Option<TemporalValue> {
    match component.kind {
        ComponentKind::Todo => component.start.or(component.end),
        _ => component.start,
    }
}

/// Length of every instance of `component`, `None` for journals.
pub(super) fn instance_length(component: &Component) -> Option<Duration> {
    if component.kind == ComponentKind::Journal {
        return None;
    }
    let start = effective_start(component)?;

    if let Some(end) = component.end {
        return Some(end.to_utc() - start.to_utc());
    }
    if let Some(duration) = component.duration {
        return Some(duration);
    }
    if component.kind == ComponentKind::Event && start.is_date() {
        return Some(Duration::days(1));
    }
    Some(Duration::zero())
}

fn instance_of(component: &Component, start: TemporalValue) -> Instance<'_> {
    Instance {
        component,
        start,
        end: instance_length(component).and_then(|length| start.shifted(length)),
        recurrence_id: None,
    }
}

/// Expands one series up to (not including) `until`.
///
/// Returns the reason as a string when the recurrence rule is rejected.
pub(super) fn expand_series<'c>(
    series: &Series<'c>,
    until: DateTime<Utc>,
) -> Result<Vec<Instance<'c>>, String> {
    let mut instances = match series.master {
        Some(master) => match effective_start(master) {
            Some(start) => master_instances(master, start, until)?,
            None => {
                debug!("Skipping component without a start: {:?}", master.uid);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    for replacement in &series.overrides {
        let Some(start) = effective_start(replacement) else {
            continue;
        };
        let mut instance = instance_of(replacement, start);
        instance.recurrence_id = replacement.recurrence_id;

        let target = replacement.recurrence_id.map(|rid| rid.to_utc());
        match instances
            .iter()
            .position(|existing| Some(existing.start.to_utc()) == target)
        {
            Some(pos) => instances[pos] = instance,
            None => instances.push(instance),
        }
    }

    Ok(instances)
}

fn master_instances<'c>(
    master: &'c Component,
    start: TemporalValue,
    until: DateTime<Utc>,
) -> Result<Vec<Instance<'c>>, String> {
    let mut starts = if master.rrules.is_empty() {
        vec![start]
    } else {
        rrule_starts(&start, &master.rrules, until)?
    };
    starts.extend(master.rdates.iter().copied());

    let excluded: Vec<DateTime<Utc>> = master.exdates.iter().map(|ex| ex.to_utc()).collect();
    let mut seen = Vec::with_capacity(starts.len());
    let mut instances = Vec::with_capacity(starts.len());
    for candidate in starts {
        let instant = candidate.to_utc();
        if excluded.contains(&instant) || seen.contains(&instant) {
            continue;
        }
        seen.push(instant);
        instances.push(instance_of(master, candidate));
    }
    instances.sort_by_key(|i| i.start.to_utc());
    Ok(instances)
}

/// Runs the rules through `rrule`. Floating and date-only series are
/// expanded as UTC and mapped back to their own shape afterwards.
fn rrule_starts(
    start: &TemporalValue,
    rules: &[String],
    until: DateTime<Utc>,
) -> Result<Vec<TemporalValue>, String> {
    let mut text = dtstart_line(start);
    for rule in rules {
        text.push_str("\nRRULE:");
        text.push_str(&anchor_until(rule, start));
    }

    let set: RRuleSet = text.parse().map_err(|e: rrule::RRuleError| e.to_string())?;
    let starts = set
        .into_iter()
        .map(|dt| dt.with_timezone(&Utc))
        .take_while(|dt| *dt < until)
        .map(|dt| reshape(start, dt))
        .collect();
    Ok(starts)
}

fn dtstart_line(start: &TemporalValue) -> String {
    match start {
        TemporalValue::Zoned(dt) if dt.timezone() != Tz::UTC => format!(
            "DTSTART;TZID={}:{}",
            dt.timezone().name(),
            format_compact(dt.naive_local())
        ),
        other => format!("DTSTART:{}", format_utc_compact(other.to_utc().naive_utc())),
    }
}

/// Rewrites a non-UTC `UNTIL` into UTC so `rrule` accepts it against the
/// anchored DTSTART.
fn anchor_until(rule: &str, start: &TemporalValue) -> String {
    rule.split(';')
        .map(|part| match part.split_once('=') {
            Some((key, value)) if key.eq_ignore_ascii_case("UNTIL") && !value.ends_with('Z') => {
                match parse_until(value, start) {
                    Some(naive_utc) => format!("UNTIL={}", format_utc_compact(naive_utc)),
                    None => part.to_string(),
                }
            }
            _ => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join(";")
}

fn reshape(start: &TemporalValue, instant: DateTime<Utc>) -> TemporalValue {
    match start {
        TemporalValue::Date(_) => TemporalValue::Date(instant.date_naive()),
        TemporalValue::Floating(_) => TemporalValue::Floating(instant.naive_utc()),
        TemporalValue::Zoned(dt) => TemporalValue::Zoned(instant.with_timezone(&dt.timezone())),
    }
}
