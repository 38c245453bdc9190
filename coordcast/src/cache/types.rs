//! Cache key and configuration types.

use std::collections::HashMap;
use std::time::Duration;

use crate::coord::{Coordinate, Format};

/// Cache key: format plus normalized input text.
///
/// Normalization is trimming and lowercasing, so `" 18TWL81 "` and
/// `"18twl81"` share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Format the text was converted as.
    pub format: Format,
    /// Trimmed, lowercased input text.
    pub text: String,
}

impl CacheKey {
    /// Builds a key from raw input text.
    pub fn new(format: Format, raw: &str) -> Self {
        Self {
            format,
            text: raw.trim().to_lowercase(),
        }
    }
}

/// A cached conversion outcome: the parsed source coordinate and its
/// equivalents in every representable format (source included).
#[derive(Debug, Clone, PartialEq)]
pub struct CachedConversion {
    /// Coordinate parsed from the input text.
    pub source: Coordinate,
    /// Equivalents keyed by format.
    pub conversions: HashMap<Format, Coordinate>,
}

/// Conversion cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries (default: 100).
    pub capacity: usize,
    /// Age past which an entry is treated as absent (default: 300 s).
    pub max_age: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            max_age: Duration::from_secs(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_normalize_case_and_whitespace() {
        let a = CacheKey::new(Format::Mgrs, "  18TWL8562811322 ");
        let b = CacheKey::new(Format::Mgrs, "18twl8562811322");
        assert_eq!(a, b);
    }

    #[test]
    fn format_distinguishes_keys() {
        let a = CacheKey::new(Format::Utm, "18T 585628 4511322");
        let b = CacheKey::new(Format::Mgrs, "18T 585628 4511322");
        assert_ne!(a, b);
    }

    #[test]
    fn default_config_matches_documented_bounds() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.max_age, Duration::from_secs(300));
    }
}
