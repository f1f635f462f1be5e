use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fixture::FixtureError;

/// All `*.ics` files below `root`, sorted by path.
pub fn discover_calendars(root: &Path) -> Result<Vec<PathBuf>, FixtureError> {
    let escaped = glob::Pattern::escape(&root.to_string_lossy());
    let pattern = format!("{}/**/*.ics", escaped.trim_end_matches('/'));

    let entries =
        glob::glob(&pattern).map_err(|e| FixtureError::Discovery(format!("{pattern}: {e}")))?;

    let mut calendars = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FixtureError::Discovery(e.to_string()))?;
        if path.is_file() {
            calendars.push(path);
        }
    }
    calendars.sort();

    debug!("Found {} calendars under {}", calendars.len(), root.display());
    Ok(calendars)
}
