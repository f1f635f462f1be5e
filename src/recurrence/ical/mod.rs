mod alarms;
mod engine;
mod expander;
mod parser;
mod values;


pub use engine::IcalEngine;
pub use parser::IcalParser;
pub use values::{parse_duration, parse_temporal};
