//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file. These
//! are pure data types; parsing lives in [`super::parser`].

use std::time::Duration;

/// Complete configuration loaded from `coordcast.ini`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Conversion cache settings.
    pub cache: CacheSettings,
    /// Debounce and budget settings.
    pub scheduler: SchedulerSettings,
    /// Word-triple geocoding settings.
    pub geocode: GeocodeSettings,
    /// Log output settings.
    pub logging: LoggingSettings,
}

/// `[cache]` section.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Maximum number of cached conversions.
    pub capacity: usize,
    /// Seconds before an entry is treated as absent.
    pub max_age_secs: u64,
}

impl CacheSettings {
    /// Max age as a duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

/// `[scheduler]` section.
#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    /// Coalescing window in milliseconds.
    pub debounce_ms: u64,
    /// Validation budget in microseconds.
    pub validate_budget_us: u64,
    /// Conversion budget in microseconds.
    pub convert_budget_us: u64,
}

impl SchedulerSettings {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate_budget(&self) -> Duration {
        Duration::from_micros(self.validate_budget_us)
    }

    pub fn convert_budget(&self) -> Duration {
        Duration::from_micros(self.convert_budget_us)
    }
}

/// `[geocode]` section.
#[derive(Debug, Clone)]
pub struct GeocodeSettings {
    /// Resolution endpoint URL.
    pub endpoint: String,
    /// Provider API key, when the provider requires one.
    pub api_key: Option<String>,
    /// Caller-side request budget, per minute.
    pub rate_limit_per_min: u32,
    /// Bound on concurrent resolution requests.
    pub max_in_flight: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl GeocodeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[logging]` section.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Directory log files are written to.
    pub directory: String,
    /// Log file name.
    pub file: String,
}
