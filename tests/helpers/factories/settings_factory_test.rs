use std::path::{Path, PathBuf};

use crate::fixture::AlarmDefectPolicy;
use crate::shared::config::CalendarErrorPolicy;
use crate::test_helpers::factories::SettingsFactory;

#[test]
fn test_settings_factory_defaults() {
    let settings = SettingsFactory::new().create();

    assert_eq!(settings.paths.calendars_dir, PathBuf::from("calendars"));
    assert_eq!(settings.paths.fixtures_dir, PathBuf::from("fixtures"));
    assert_eq!(settings.batch.skip_marker, "skip_");
    assert_eq!(settings.batch.on_calendar_error, CalendarErrorPolicy::Halt);
    assert_eq!(settings.batch.alarm_defects, AlarmDefectPolicy::SkipAndLog);
    assert!(settings.logging.log_dir.is_none());
}

#[test]
fn test_settings_factory_rooted_at_moves_both_dirs() {
    let settings = SettingsFactory::new()
        .rooted_at(Path::new("/tmp/run"))
        .on_calendar_error(CalendarErrorPolicy::Skip)
        .create();

    assert_eq!(settings.paths.calendars_dir, Path::new("/tmp/run/calendars"));
    assert_eq!(settings.paths.fixtures_dir, Path::new("/tmp/run/fixtures"));
    assert_eq!(settings.batch.on_calendar_error, CalendarErrorPolicy::Skip);
}
