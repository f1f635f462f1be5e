mod alarms;
mod assemble;
mod document;
mod encode;
mod error;
mod normalize;
mod window;
mod writer;


pub use alarms::{AlarmDefectPolicy, AlarmResolver, EncodedAlarm};
pub use assemble::{FixtureAssembler, issue_number};
pub use document::{FixtureDocument, FixtureQuery, FixtureResult, sort_by_start};
pub use encode::{EncodedOccurrence, encode};
pub use error::FixtureError;
pub use normalize::{NormalizedTime, format_utc, normalize, normalize_value};
pub use window::{DEFAULT_WINDOW_END, DEFAULT_WINDOW_START, QueryWindow};
pub use writer::{to_fixture_json, write_fixture};
