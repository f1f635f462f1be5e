use std::path::Path;

use crate::fixture::AlarmDefectPolicy;
use crate::shared::config::{
    BatchConfig, CalendarErrorPolicy, LoggingConfig, PathsConfig, Settings,
};

pub struct SettingsFactory {
    settings: Settings,
}

impl SettingsFactory {
    pub fn new() -> Self {
        Self {
            settings: Settings {
                paths: PathsConfig {
                    calendars_dir: "calendars".into(),
                    fixtures_dir: "fixtures".into(),
                },
                batch: BatchConfig {
                    skip_marker: "skip_".into(),
                    on_calendar_error: CalendarErrorPolicy::Halt,
                    alarm_defects: AlarmDefectPolicy::SkipAndLog,
                },
                logging: LoggingConfig {
                    stdout_level: "debug".into(),
                    log_dir: None,
                    file_level: "debug".into(),
                },
            },
        }
    }

    /// Points both directories below `base`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        self.settings.paths.calendars_dir = base.join("calendars");
        self.settings.paths.fixtures_dir = base.join("fixtures");
        self
    }

    pub fn on_calendar_error(mut self, policy: CalendarErrorPolicy) -> Self {
        self.settings.batch.on_calendar_error = policy;
        self
    }

    pub fn create(self) -> Settings {
        self.settings
    }
}
