use chrono::Duration;

use crate::recurrence::ComponentKind;
use crate::test_helpers::factories::OccurrenceFactory;
use crate::test_helpers::factories::time::utc;

#[test]
fn test_occurrence_factory_defaults_to_one_hour_event() {
    let occurrence = OccurrenceFactory::new().create();

    assert_eq!(occurrence.kind, ComponentKind::Event);
    assert_eq!(occurrence.uid.as_deref(), Some("e1"));
    assert_eq!(occurrence.start, utc(2024, 1, 1, 10, 0));
    assert_eq!(occurrence.end, Some(utc(2024, 1, 1, 11, 0)));
    assert!(occurrence.alarms().unwrap().is_empty());
}

#[test]
fn test_occurrence_factory_starting_keeps_length() {
    let occurrence = OccurrenceFactory::new()
        .end(utc(2024, 1, 1, 10, 0).shifted(Duration::minutes(30)))
        .starting(utc(2024, 3, 5, 8, 0))
        .create();

    assert_eq!(occurrence.end, Some(utc(2024, 3, 5, 8, 30)));
}

#[test]
fn test_occurrence_factory_alarm_defect_surfaces_on_read() {
    let occurrence = OccurrenceFactory::new()
        .without_uid()
        .alarm_defect("bad trigger")
        .create();

    assert!(occurrence.uid.is_none());
    assert!(occurrence.alarms().unwrap_err().is_alarm_read_defect());
}
