use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a recurrence engine while answering a query.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Alarm data whose value type does not match what the engine expects.
    /// Known engine defect; callers may recover from it.
    #[error("alarm read type mismatch: {0}")]
    AlarmReadDefect(String),

    #[error("malformed recurrence series '{uid}': {reason}")]
    MalformedSeries { uid: String, reason: String },

    #[error("invalid query window: {0}")]
    InvalidWindow(String),
}

impl EngineError {
    pub fn is_alarm_read_defect(&self) -> bool {
        matches!(self, EngineError::AlarmReadDefect(_))
    }
}

/// Errors raised while reading a calendar source file.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Failed to read calendar file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid calendar format in {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    #[error("Invalid {property} value in {path}: {reason}")]
    InvalidValue {
        path: PathBuf,
        property: String,
        reason: String,
    },
}
