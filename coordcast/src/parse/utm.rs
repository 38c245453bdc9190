//! UTM parser: zone, latitude band, easting, northing.

use std::sync::OnceLock;

use regex::Regex;

use crate::coord::band::{hemisphere_for_band, is_valid_band};
use crate::coord::{Format, Utm};

use super::ParseError;

fn utm_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Pattern breakdown:
        // (\d{1,2})        - zone number
        // ([A-Za-z])       - latitude band letter
        // (\d+(?:\.\d+)?)  - easting in meters
        // (\d+(?:\.\d+)?)  - northing in meters
        // The two numeric groups must be whitespace separated; the digits
        // carry no sign, so easting/northing are non-negative by grammar.
        Regex::new(r"^(\d{1,2})\s*([A-Za-z])\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)$").unwrap()
    })
}

/// Parses UTM text such as `18T 585628 4511322`.
///
/// The hemisphere is derived from the latitude-band table (bands C-M are
/// southern, N-X northern), not from comparing the letter against 'N'.
///
/// # Errors
///
/// `InvalidZone` outside 1-60, `InvalidBand` for letters missing from the
/// band table, `GrammarMismatch` when the shape does not apply.
pub fn parse(raw: &str) -> Result<Utm, ParseError> {
    let caps = utm_pattern()
        .captures(raw)
        .ok_or(ParseError::GrammarMismatch(Format::Utm))?;

    let zone: u32 = caps[1].parse().unwrap();
    if !(1..=60).contains(&zone) {
        return Err(ParseError::InvalidZone(zone));
    }

    let band = caps[2].chars().next().unwrap().to_ascii_uppercase();
    if !is_valid_band(band) {
        return Err(ParseError::InvalidBand(band));
    }
    // is_valid_band guarantees a table entry.
    let hemisphere = hemisphere_for_band(band).unwrap();

    let easting: f64 = caps[3].parse().unwrap();
    let northing: f64 = caps[4].parse().unwrap();

    Ok(Utm {
        zone: zone as u8,
        hemisphere,
        easting,
        northing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Hemisphere;

    #[test]
    fn parses_compact_zone_band() {
        let utm = parse("18T 585628 4511322").unwrap();
        assert_eq!(utm.zone, 18);
        assert_eq!(utm.hemisphere, Hemisphere::North);
        assert_eq!(utm.easting, 585_628.0);
        assert_eq!(utm.northing, 4_511_322.0);
    }

    #[test]
    fn parses_spaced_zone_band_and_decimals() {
        let utm = parse("56 H 334873.5 6252266.4").unwrap();
        assert_eq!(utm.zone, 56);
        assert_eq!(utm.hemisphere, Hemisphere::South);
        assert_eq!(utm.easting, 334_873.5);
    }

    #[test]
    fn southern_band_letters_derive_south() {
        // M/N is the equator boundary in the band table; pin both sides
        // and both extremes.
        assert_eq!(parse("33M 300000 9800000").unwrap().hemisphere, Hemisphere::South);
        assert_eq!(parse("33C 500000 2000000").unwrap().hemisphere, Hemisphere::South);
        assert_eq!(parse("33N 300000 100000").unwrap().hemisphere, Hemisphere::North);
        assert_eq!(parse("33X 500000 8800000").unwrap().hemisphere, Hemisphere::North);
    }

    #[test]
    fn zone_boundaries() {
        assert!(parse("1C 500000 2000000").is_ok());
        assert!(parse("60X 500000 8800000").is_ok());
        assert_eq!(
            parse("0N 500000 100000"),
            Err(ParseError::InvalidZone(0))
        );
        assert_eq!(
            parse("61N 500000 100000"),
            Err(ParseError::InvalidZone(61))
        );
    }

    #[test]
    fn band_letters_i_and_o_are_rejected() {
        assert_eq!(
            parse("18I 585628 4511322"),
            Err(ParseError::InvalidBand('I'))
        );
        assert_eq!(
            parse("18O 585628 4511322"),
            Err(ParseError::InvalidBand('O'))
        );
        assert_eq!(
            parse("18A 585628 4511322"),
            Err(ParseError::InvalidBand('A'))
        );
    }

    #[test]
    fn lowercase_band_is_accepted() {
        let utm = parse("18t 585628 4511322").unwrap();
        assert_eq!(utm.hemisphere, Hemisphere::North);
    }

    #[test]
    fn malformed_text_is_a_grammar_mismatch() {
        assert_eq!(
            parse("18T585628 4511322"),
            Err(ParseError::GrammarMismatch(Format::Utm))
        );
        assert_eq!(
            parse("18T 585628"),
            Err(ParseError::GrammarMismatch(Format::Utm))
        );
        assert_eq!(
            parse("-18T 585628 4511322"),
            Err(ParseError::GrammarMismatch(Format::Utm))
        );
    }
}
