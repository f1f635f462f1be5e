use std::path::PathBuf;
use thiserror::Error;

use crate::recurrence::{CalendarError, EngineError};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Recurrence engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Calendar discovery failed: {0}")]
    Discovery(String),
}

impl FixtureError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
