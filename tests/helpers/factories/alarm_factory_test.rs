use crate::test_helpers::factories::AlarmFactory;
use crate::test_helpers::factories::time::utc;

#[test]
fn test_alarm_factory_collects_triggers_in_order() {
    let alarm = AlarmFactory::new()
        .trigger(utc(2024, 1, 1, 9, 45))
        .acknowledged_trigger(utc(2024, 1, 1, 9, 50))
        .create();

    assert_eq!(alarm.uid.as_deref(), Some("a1"));
    assert_eq!(alarm.triggers.len(), 2);
    assert_eq!(alarm.triggers[0].at, utc(2024, 1, 1, 9, 45));
    assert!(!alarm.triggers[0].acknowledged);
    assert!(alarm.triggers[1].acknowledged);
}

#[test]
fn test_alarm_factory_without_uid() {
    let alarm = AlarmFactory::new().uid(None).create();

    assert!(alarm.uid.is_none());
    assert!(alarm.triggers.is_empty());
}
