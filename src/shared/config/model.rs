use std::path::PathBuf;

use serde::Deserialize;

use crate::fixture::AlarmDefectPolicy;

/// Name of the optional settings file looked up in the working directory
/// (any extension the `config` crate understands, e.g. `recur_fixtures.toml`).
pub const DEFAULT_CONFIG_NAME: &str = "recur_fixtures";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub paths: PathsConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Searched recursively for `*.ics` files.
    pub calendars_dir: PathBuf,
    pub fixtures_dir: PathBuf,
}

/// What the batch does when one calendar fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarErrorPolicy {
    /// Stop the run; fixtures already written stay on disk.
    Halt,
    /// Log the failure and continue with the next calendar.
    Skip,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Calendars whose file stem starts with this prefix produce no fixture.
    pub skip_marker: String,
    pub on_calendar_error: CalendarErrorPolicy,
    pub alarm_defects: AlarmDefectPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub stdout_level: String,
    /// Enables a daily rolling log file in this directory.
    pub log_dir: Option<String>,
    pub file_level: String,
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    load_settings_from(DEFAULT_CONFIG_NAME)
}

/// Built-in defaults overlaid by the settings file at `config_path`, which
/// may be missing.
pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("paths.calendars_dir", "calendars")?
        .set_default("paths.fixtures_dir", "fixtures")?
        .set_default("batch.skip_marker", "skip_")?
        .set_default("batch.on_calendar_error", "halt")?
        .set_default("batch.alarm_defects", "skip_and_log")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .add_source(config::File::with_name(config_path).required(false))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
