//! Engine configuration.
//!
//! Settings structs live in [`settings`], constants and the `Default`
//! implementation in [`defaults`], INI loading in [`file`] and
//! [`parser`]. Components never read the file themselves; the service
//! facade loads a [`ConfigFile`] once and hands each component its slice.

mod defaults;
mod file;
mod parser;
mod settings;

pub use defaults::{
    config_file_path, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_MAX_AGE_SECS,
    DEFAULT_CONVERT_BUDGET_US, DEFAULT_DEBOUNCE_MS, DEFAULT_GEOCODE_ENDPOINT,
    DEFAULT_GEOCODE_IN_FLIGHT, DEFAULT_GEOCODE_RATE_LIMIT, DEFAULT_GEOCODE_TIMEOUT_SECS,
    DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_FILE, DEFAULT_VALIDATE_BUDGET_US,
};
pub use file::ConfigFileError;
pub use settings::{
    CacheSettings, ConfigFile, GeocodeSettings, LoggingSettings, SchedulerSettings,
};
