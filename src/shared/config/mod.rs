mod model;


pub use model::{
    BatchConfig, CalendarErrorPolicy, DEFAULT_CONFIG_NAME, LoggingConfig, PathsConfig, Settings,
    load_settings, load_settings_from,
};
