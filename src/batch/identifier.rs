use std::fmt;
use std::path::Path;

/// Stable name of a generated fixture: `<ordinal:03>-<stem with '-' for '_'>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIdentifier {
    pub ordinal: usize,
    pub name: String,
}

impl TestIdentifier {
    pub fn new(ordinal: usize, calendar_path: &Path) -> Self {
        Self {
            ordinal,
            name: file_stem(calendar_path).replace('_', "-"),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{self}.json")
    }
}

impl fmt::Display for TestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}-{}", self.ordinal, self.name)
    }
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// True when the calendar's file stem starts with `marker`.
pub fn has_skip_marker(calendar_path: &Path, marker: &str) -> bool {
    !marker.is_empty() && file_stem(calendar_path).starts_with(marker)
}
