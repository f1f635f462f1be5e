use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::discovery::discover_calendars;
use super::identifier::{TestIdentifier, has_skip_marker};
use crate::fixture::{FixtureAssembler, FixtureError, QueryWindow, write_fixture};
use crate::recurrence::{CalendarParser, RecurrenceEngine};
use crate::shared::config::{CalendarErrorPolicy, Settings};
use crate::shared::path::absolutize;

/// What happened to each calendar of a run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

enum Outcome {
    Written(PathBuf),
    Skipped,
}

/// Generates one fixture per calendar file, in path order.
pub struct BatchDriver<'a, P, E> {
    parser: &'a P,
    engine: &'a E,
    settings: &'a Settings,
    window: QueryWindow,
}

impl<'a, P: CalendarParser, E: RecurrenceEngine> BatchDriver<'a, P, E> {
    pub fn new(parser: &'a P, engine: &'a E, settings: &'a Settings, window: QueryWindow) -> Self {
        Self {
            parser,
            engine,
            settings,
            window,
        }
    }

    pub fn run(&self) -> Result<BatchReport, FixtureError> {
        let calendars_dir = &self.settings.paths.calendars_dir;
        let fixtures_dir = &self.settings.paths.fixtures_dir;

        if !calendars_dir.is_dir() {
            warn!(
                "Calendar directory {} does not exist",
                absolutize(calendars_dir).display()
            );
        }
        fs::create_dir_all(fixtures_dir).map_err(|e| FixtureError::io(fixtures_dir, e))?;

        let mut report = BatchReport::default();
        for (ordinal, calendar_path) in discover_calendars(calendars_dir)?.into_iter().enumerate() {
            match self.process(ordinal, &calendar_path) {
                Ok(Outcome::Written(fixture)) => report.written.push(fixture),
                Ok(Outcome::Skipped) => report.skipped.push(calendar_path),
                Err(e) => match self.settings.batch.on_calendar_error {
                    CalendarErrorPolicy::Halt => {
                        error!("Aborting batch at {}: {}", calendar_path.display(), e);
                        return Err(e);
                    }
                    CalendarErrorPolicy::Skip => {
                        error!("Skipping {}: {}", calendar_path.display(), e);
                        report.failed.push((calendar_path, e.to_string()));
                    }
                },
            }
        }

        info!(
            "Wrote {} fixtures to {} ({} skipped, {} failed)",
            report.written.len(),
            fixtures_dir.display(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// The ordinal is consumed even when the calendar is skipped.
    fn process(&self, ordinal: usize, calendar_path: &Path) -> Result<Outcome, FixtureError> {
        let calendar = self.parser.parse(calendar_path)?;

        let identifier = TestIdentifier::new(ordinal, calendar_path);
        if has_skip_marker(calendar_path, &self.settings.batch.skip_marker) {
            info!("Skipping {} ({})", calendar_path.display(), identifier);
            return Ok(Outcome::Skipped);
        }

        let document = FixtureAssembler::new(self.engine, self.window, &self.settings.paths.calendars_dir)
            .with_alarm_policy(self.settings.batch.alarm_defects)
            .assemble(&calendar, calendar_path)?;

        let fixture_path = self.settings.paths.fixtures_dir.join(identifier.file_name());
        write_fixture(&fixture_path, &document)?;
        info!("Wrote {}", fixture_path.display());
        Ok(Outcome::Written(fixture_path))
    }
}
