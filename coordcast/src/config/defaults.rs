//! Default values for all configuration settings.

use std::path::PathBuf;

use super::settings::{
    CacheSettings, ConfigFile, GeocodeSettings, LoggingSettings, SchedulerSettings,
};

/// Conversion cache entry bound.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;
/// Conversion cache entry lifetime.
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 300;

/// Coalescing window: one display frame at 60 Hz.
pub const DEFAULT_DEBOUNCE_MS: u64 = 16;
/// Interactive validation budget.
pub const DEFAULT_VALIDATE_BUDGET_US: u64 = 1_000;
/// Full conversion budget.
pub const DEFAULT_CONVERT_BUDGET_US: u64 = 8_000;

/// Word-triple resolution endpoint.
pub const DEFAULT_GEOCODE_ENDPOINT: &str =
    "https://api.what3words.com/v3/convert-to-coordinates";
/// Documented provider budget, requests per minute.
pub const DEFAULT_GEOCODE_RATE_LIMIT: u32 = 60;
/// Bound on concurrent resolution requests.
pub const DEFAULT_GEOCODE_IN_FLIGHT: usize = 4;
/// Resolution request timeout.
pub const DEFAULT_GEOCODE_TIMEOUT_SECS: u64 = 10;

/// Log directory, relative to the working directory.
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
/// Log file name.
pub const DEFAULT_LOG_FILE: &str = "coordcast.log";

/// Path of the user config file
/// (`<config dir>/coordcast/coordcast.ini`).
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coordcast")
        .join("coordcast.ini")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            cache: CacheSettings {
                capacity: DEFAULT_CACHE_CAPACITY,
                max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
            },
            scheduler: SchedulerSettings {
                debounce_ms: DEFAULT_DEBOUNCE_MS,
                validate_budget_us: DEFAULT_VALIDATE_BUDGET_US,
                convert_budget_us: DEFAULT_CONVERT_BUDGET_US,
            },
            geocode: GeocodeSettings {
                endpoint: DEFAULT_GEOCODE_ENDPOINT.to_string(),
                api_key: None,
                rate_limit_per_min: DEFAULT_GEOCODE_RATE_LIMIT,
                max_in_flight: DEFAULT_GEOCODE_IN_FLIGHT,
                timeout_secs: DEFAULT_GEOCODE_TIMEOUT_SECS,
            },
            logging: LoggingSettings {
                directory: DEFAULT_LOG_DIRECTORY.to_string(),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults_match_documented_contract() {
        let config = ConfigFile::default();
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.cache.max_age(), Duration::from_secs(300));
        assert_eq!(config.scheduler.debounce_window(), Duration::from_millis(16));
        assert_eq!(config.geocode.rate_limit_per_min, 60);
        assert!(config.geocode.api_key.is_none());
    }
}
