//! INI parsing logic for converting `Ini` into a `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.
//! Starts from `ConfigFile::default()` and overlays any values found.

use std::str::FromStr;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parses a numeric key, reporting section/key/value on failure.
fn parse_number<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        })
}

pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("capacity") {
            let capacity: usize = parse_number("cache", "capacity", v, "expected a positive integer")?;
            if capacity == 0 {
                return Err(ConfigFileError::InvalidValue {
                    section: "cache".to_string(),
                    key: "capacity".to_string(),
                    value: v.to_string(),
                    reason: "capacity must be at least 1".to_string(),
                });
            }
            config.cache.capacity = capacity;
        }
        if let Some(v) = section.get("max_age_secs") {
            config.cache.max_age_secs =
                parse_number("cache", "max_age_secs", v, "expected seconds as an integer")?;
        }
    }

    if let Some(section) = ini.section(Some("scheduler")) {
        if let Some(v) = section.get("debounce_ms") {
            config.scheduler.debounce_ms =
                parse_number("scheduler", "debounce_ms", v, "expected milliseconds as an integer")?;
        }
        if let Some(v) = section.get("validate_budget_us") {
            config.scheduler.validate_budget_us = parse_number(
                "scheduler",
                "validate_budget_us",
                v,
                "expected microseconds as an integer",
            )?;
        }
        if let Some(v) = section.get("convert_budget_us") {
            config.scheduler.convert_budget_us = parse_number(
                "scheduler",
                "convert_budget_us",
                v,
                "expected microseconds as an integer",
            )?;
        }
    }

    if let Some(section) = ini.section(Some("geocode")) {
        if let Some(v) = section.get("endpoint") {
            let v = v.trim();
            if !v.is_empty() {
                config.geocode.endpoint = v.to_string();
            }
        }
        if let Some(v) = section.get("api_key") {
            let v = v.trim();
            if !v.is_empty() {
                config.geocode.api_key = Some(v.to_string());
            }
        }
        if let Some(v) = section.get("rate_limit_per_min") {
            config.geocode.rate_limit_per_min = parse_number(
                "geocode",
                "rate_limit_per_min",
                v,
                "expected requests per minute as an integer",
            )?;
        }
        if let Some(v) = section.get("max_in_flight") {
            let max_in_flight: usize = parse_number(
                "geocode",
                "max_in_flight",
                v,
                "expected a positive integer",
            )?;
            if max_in_flight == 0 {
                return Err(ConfigFileError::InvalidValue {
                    section: "geocode".to_string(),
                    key: "max_in_flight".to_string(),
                    value: v.to_string(),
                    reason: "at least one request must be allowed in flight".to_string(),
                });
            }
            config.geocode.max_in_flight = max_in_flight;
        }
        if let Some(v) = section.get("timeout_secs") {
            config.geocode.timeout_secs =
                parse_number("geocode", "timeout_secs", v, "expected seconds as an integer")?;
        }
    }

    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = v.to_string();
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sections_and_keys_are_ignored() {
        let ini = Ini::load_from_str("[rendering]\ncrosshair = true\n\n[cache]\ntheme = dark\n")
            .unwrap();
        let config = parse_ini(&ini).unwrap();
        assert_eq!(config.cache.capacity, 100);
    }

    #[test]
    fn every_section_overlays() {
        let ini = Ini::load_from_str(
            "[cache]\ncapacity = 10\n[scheduler]\nconvert_budget_us = 500\n\
             [geocode]\nendpoint = https://example.test\nmax_in_flight = 2\n\
             [logging]\ndirectory = /tmp/logs\n",
        )
        .unwrap();
        let config = parse_ini(&ini).unwrap();
        assert_eq!(config.cache.capacity, 10);
        assert_eq!(config.scheduler.convert_budget_us, 500);
        assert_eq!(config.geocode.endpoint, "https://example.test");
        assert_eq!(config.geocode.max_in_flight, 2);
        assert_eq!(config.logging.directory, "/tmp/logs");
    }

    #[test]
    fn zero_in_flight_bound_is_rejected() {
        let ini = Ini::load_from_str("[geocode]\nmax_in_flight = 0\n").unwrap();
        assert!(parse_ini(&ini).is_err());
    }
}
