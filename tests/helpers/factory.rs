pub use super::factories::{AlarmFactory, OccurrenceFactory, SettingsFactory};

pub struct Factory;

impl Factory {
    pub fn occurrence() -> OccurrenceFactory {
        OccurrenceFactory::new()
    }

    pub fn alarm() -> AlarmFactory {
        AlarmFactory::new()
    }

    pub fn settings() -> SettingsFactory {
        SettingsFactory::new()
    }
}
