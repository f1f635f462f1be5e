use recur_fixtures::batch::BatchDriver;
use recur_fixtures::fixture::QueryWindow;
use recur_fixtures::logging;
use recur_fixtures::recurrence::{IcalEngine, IcalParser};
use recur_fixtures::shared::config::load_settings;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    logging::init(&settings.logging)?;

    info!(
        "Generating fixtures from {} into {}",
        settings.paths.calendars_dir.display(),
        settings.paths.fixtures_dir.display()
    );

    let driver = BatchDriver::new(&IcalParser, &IcalEngine, &settings, QueryWindow::default());
    let report = driver.run()?;

    if !report.failed.is_empty() {
        anyhow::bail!("{} calendars failed", report.failed.len());
    }
    Ok(())
}
