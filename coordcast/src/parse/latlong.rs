//! Latitude/longitude parser: decimal degrees or degree-minute-second.

use std::sync::OnceLock;

use regex::Regex;

use crate::coord::{Format, LatLong, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};

use super::ParseError;

fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Pattern breakdown:
        // ([+-]?\d+(?:\.\d+)?) - signed decimal latitude
        // \s*,\s* or \s+       - comma or whitespace separator
        // ([+-]?\d+(?:\.\d+)?) - signed decimal longitude
        Regex::new(r"^([+-]?\d+(?:\.\d+)?)(?:\s*,\s*|\s+)([+-]?\d+(?:\.\d+)?)$").unwrap()
    })
}

fn dms_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // One DMS half: degrees ° minutes ' seconds " hemisphere, with
        // ASCII or Unicode prime marks. Latitude half takes N/S, longitude
        // half takes E/W, in that order.
        Regex::new(concat!(
            r"^(\d{1,2})\s*°\s*(\d{1,2})\s*['′]\s*(\d{1,2}(?:\.\d+)?)\s*",
            "[\"″]\\s*([NSns])",
            r"[,\s]+",
            r"(\d{1,3})\s*°\s*(\d{1,2})\s*['′]\s*(\d{1,2}(?:\.\d+)?)\s*",
            "[\"″]\\s*([EWew])$",
        ))
        .unwrap()
    })
}

/// Converts one DMS triple to decimal degrees, negated for S/W.
fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, negative: bool) -> f64 {
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    if negative {
        -decimal
    } else {
        decimal
    }
}

/// Parses decimal-degree or DMS latitude/longitude text.
///
/// # Errors
///
/// `OutOfRange` when a component leaves its domain (|lat| > 90, |lng| > 180,
/// minutes or seconds >= 60); `GrammarMismatch` when neither pattern
/// applies.
pub fn parse(raw: &str) -> Result<LatLong, ParseError> {
    if let Some(caps) = decimal_pattern().captures(raw) {
        // Group lengths are bounded by the pattern, so parse cannot fail.
        let lat: f64 = caps[1].parse().unwrap();
        let lng: f64 = caps[2].parse().unwrap();
        return check_range(lat, lng);
    }

    if let Some(caps) = dms_pattern().captures(raw) {
        let lat_minutes: f64 = caps[2].parse().unwrap();
        let lat_seconds: f64 = caps[3].parse().unwrap();
        let lng_minutes: f64 = caps[6].parse().unwrap();
        let lng_seconds: f64 = caps[7].parse().unwrap();

        for (quantity, value) in [
            ("minutes", lat_minutes),
            ("seconds", lat_seconds),
            ("minutes", lng_minutes),
            ("seconds", lng_seconds),
        ] {
            if value >= 60.0 {
                return Err(ParseError::OutOfRange {
                    quantity,
                    value,
                    min: 0.0,
                    max: 60.0,
                });
            }
        }

        let south = caps[4].eq_ignore_ascii_case("S");
        let west = caps[8].eq_ignore_ascii_case("W");

        let lat = dms_to_decimal(caps[1].parse().unwrap(), lat_minutes, lat_seconds, south);
        let lng = dms_to_decimal(caps[5].parse().unwrap(), lng_minutes, lng_seconds, west);
        return check_range(lat, lng);
    }

    Err(ParseError::GrammarMismatch(Format::LatLong))
}

fn check_range(lat: f64, lng: f64) -> Result<LatLong, ParseError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(ParseError::latitude_out_of_range(lat));
    }
    if !(MIN_LNG..=MAX_LNG).contains(&lng) {
        return Err(ParseError::longitude_out_of_range(lng));
    }
    Ok(LatLong::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_decimal() {
        let pos = parse("40.7128, -74.0060").unwrap();
        assert_eq!(pos.lat, 40.7128);
        assert_eq!(pos.lng, -74.0060);
    }

    #[test]
    fn parses_whitespace_separated_decimal() {
        let pos = parse("40.7128 -74.0060").unwrap();
        assert_eq!(pos.lat, 40.7128);
        assert_eq!(pos.lng, -74.0060);
    }

    #[test]
    fn parses_integer_degrees() {
        let pos = parse("40,-74").unwrap();
        assert_eq!(pos.lat, 40.0);
        assert_eq!(pos.lng, -74.0);
    }

    #[test]
    fn parses_dms_with_hemisphere_letters() {
        let pos = parse("40°42'46.08\"N 74°0'21.6\"W").unwrap();
        assert!((pos.lat - 40.7128).abs() < 1e-6, "lat {}", pos.lat);
        assert!((pos.lng - (-74.006)).abs() < 1e-6, "lng {}", pos.lng);
    }

    #[test]
    fn parses_dms_with_unicode_marks() {
        let pos = parse("40°42′46.08″N 74°0′21.6″W").unwrap();
        assert!((pos.lat - 40.7128).abs() < 1e-6);
    }

    #[test]
    fn southern_and_western_hemispheres_negate() {
        let pos = parse("33°52'7.68\"S 151°12'33.48\"E").unwrap();
        assert!(pos.lat < 0.0);
        assert!(pos.lng > 0.0);
    }

    #[test]
    fn boundary_values_are_valid() {
        assert!(parse("90, 180").is_ok());
        assert!(parse("-90, -180").is_ok());
        assert!(parse("90.0, 0.0").is_ok());
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let err = parse("90.0000001, 0.0").unwrap_err();
        assert!(matches!(
            err,
            ParseError::OutOfRange {
                quantity: "latitude",
                ..
            }
        ));

        let err = parse("91.0, 0.0").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn out_of_range_longitude_is_rejected() {
        let err = parse("0.0, 180.0000001").unwrap_err();
        assert!(matches!(
            err,
            ParseError::OutOfRange {
                quantity: "longitude",
                ..
            }
        ));
    }

    #[test]
    fn dms_minutes_over_sixty_are_rejected() {
        let err = parse("40°61'0\"N 74°0'0\"W").unwrap_err();
        assert!(matches!(
            err,
            ParseError::OutOfRange {
                quantity: "minutes",
                ..
            }
        ));
    }

    #[test]
    fn unrelated_text_is_a_grammar_mismatch() {
        assert_eq!(
            parse("not a coordinate"),
            Err(ParseError::GrammarMismatch(Format::LatLong))
        );
        assert_eq!(
            parse(""),
            Err(ParseError::GrammarMismatch(Format::LatLong))
        );
    }
}
