pub mod alarm_factory;
pub mod occurrence_factory;
pub mod settings_factory;
pub mod time;

pub use alarm_factory::AlarmFactory;
pub use occurrence_factory::OccurrenceFactory;
pub use settings_factory::SettingsFactory;

#[cfg(test)]
mod alarm_factory_test;
#[cfg(test)]
mod occurrence_factory_test;
#[cfg(test)]
mod settings_factory_test;
