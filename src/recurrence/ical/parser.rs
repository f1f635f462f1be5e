use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ::ical::parser::ical::component::IcalAlarm;
use ::ical::property::Property;
use chrono::Duration;
use tracing::{debug, warn};

use super::values::{
    ValueError, parse_duration_property, parse_integer_property, parse_temporal,
    parse_temporal_list,
};
use crate::recurrence::calendar::{AlarmComponent, Calendar, Component, RawProperty};
use crate::recurrence::errors::CalendarError;
use crate::recurrence::traits::CalendarParser;
use crate::recurrence::types::ComponentKind;

/// Reads `.ics` files with the `ical` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcalParser;

impl CalendarParser for IcalParser {
    fn parse(&self, path: &Path) -> Result<Calendar, CalendarError> {
        let file = File::open(path).map_err(|source| CalendarError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(BufReader::new(file), path)
    }
}

impl IcalParser {
    /// Parses calendar text already in memory; `origin` only labels errors.
    pub fn parse_str(&self, source: &str, origin: &Path) -> Result<Calendar, CalendarError> {
        self.read(BufReader::new(source.as_bytes()), origin)
    }

    fn read<R: BufRead>(&self, reader: R, origin: &Path) -> Result<Calendar, CalendarError> {
        let mut calendar = Calendar::default();

        for parsed in ::ical::IcalParser::new(reader) {
            let ical_calendar = parsed.map_err(|e| CalendarError::InvalidFormat {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

            for event in &ical_calendar.events {
                let component =
                    build_component(ComponentKind::Event, &event.properties, &event.alarms, origin)?;
                calendar.components.push(component);
            }
            for todo in &ical_calendar.todos {
                let component =
                    build_component(ComponentKind::Todo, &todo.properties, &todo.alarms, origin)?;
                calendar.components.push(component);
            }
            for journal in &ical_calendar.journals {
                let component =
                    build_component(ComponentKind::Journal, &journal.properties, &[], origin)?;
                calendar.components.push(component);
            }
        }

        debug!(
            "Parsed {} components from {}",
            calendar.components.len(),
            origin.display()
        );
        Ok(calendar)
    }
}

fn raw(property: &Property) -> RawProperty {
    RawProperty {
        name: property.name.to_ascii_uppercase(),
        params: property.params.clone().unwrap_or_default(),
        value: property.value.clone(),
    }
}

fn invalid(origin: &Path, property: &str, err: ValueError) -> CalendarError {
    CalendarError::InvalidValue {
        path: origin.to_path_buf(),
        property: property.to_string(),
        reason: err.to_string(),
    }
}

fn build_component(
    kind: ComponentKind,
    properties: &[Property],
    alarms: &[IcalAlarm],
    origin: &Path,
) -> Result<Component, CalendarError> {
    let mut component = Component::new(kind);

    for property in properties.iter().map(raw) {
        let name = property.name.as_str();
        match name {
            "UID" => component.uid = property.value.clone(),
            "SEQUENCE" => {
                let sequence =
                    parse_integer_property(&property).map_err(|e| invalid(origin, name, e))?;
                component.sequence = Some(sequence);
            }
            "DTSTART" => {
                component.start =
                    Some(parse_temporal(&property).map_err(|e| invalid(origin, name, e))?);
            }
            "DTEND" | "DUE" => {
                component.end =
                    Some(parse_temporal(&property).map_err(|e| invalid(origin, name, e))?);
            }
            "DURATION" => {
                component.duration =
                    Some(parse_duration_property(&property).map_err(|e| invalid(origin, name, e))?);
            }
            "RECURRENCE-ID" => {
                component.recurrence_id =
                    Some(parse_temporal(&property).map_err(|e| invalid(origin, name, e))?);
            }
            "RRULE" => component.rrules.push(property.value().to_string()),
            "RDATE" => component
                .rdates
                .extend(parse_temporal_list(&property).map_err(|e| invalid(origin, name, e))?),
            "EXDATE" => component
                .exdates
                .extend(parse_temporal_list(&property).map_err(|e| invalid(origin, name, e))?),
            _ => {}
        }
    }

    component.alarms = alarms.iter().map(build_alarm).collect();
    Ok(component)
}

/// Alarm values are kept lenient: an unreadable TRIGGER is reported by the
/// engine when the alarm is read, not when the file is parsed.
fn build_alarm(alarm: &IcalAlarm) -> AlarmComponent {
    let mut parsed = AlarmComponent::default();

    for property in alarm.properties.iter().map(raw) {
        match property.name.as_str() {
            "UID" => parsed.uid = property.value.clone(),
            "TRIGGER" => parsed.trigger = Some(property),
            "REPEAT" => match parse_integer_property(&property) {
                Ok(n) if (0..=i64::from(i32::MAX)).contains(&n) => parsed.repeat = n as u32,
                _ => warn!("Ignoring invalid alarm REPEAT '{}'", property.value()),
            },
            "DURATION" => match parse_duration_property(&property) {
                Ok(interval) if interval > Duration::zero() => {
                    parsed.repeat_interval = Some(interval)
                }
                Ok(_) => warn!(
                    "Ignoring non-positive alarm DURATION '{}'",
                    property.value()
                ),
                Err(e) => warn!("Ignoring invalid alarm DURATION: {}", e),
            },
            "ACKNOWLEDGED" => match parse_temporal(&property) {
                Ok(ack) => parsed.acknowledged = Some(ack.to_utc()),
                Err(e) => warn!("Ignoring invalid alarm ACKNOWLEDGED: {}", e),
            },
            _ => {}
        }
    }

    parsed
}
