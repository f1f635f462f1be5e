mod discovery;
mod driver;
mod identifier;


pub use discovery::discover_calendars;
pub use driver::{BatchDriver, BatchReport};
pub use identifier::{TestIdentifier, has_skip_marker};
