pub mod calendar;
pub mod errors;
pub mod ical;
pub mod traits;
pub mod types;


pub use calendar::{AlarmComponent, Calendar, Component, RawProperty};
pub use errors::{CalendarError, EngineError};
pub use self::ical::{IcalEngine, IcalParser};
pub use traits::{CalendarParser, Query, RecurrenceEngine};
pub use types::{Alarm, ComponentKind, Occurrence, QueryOptions, TemporalValue, Trigger};
