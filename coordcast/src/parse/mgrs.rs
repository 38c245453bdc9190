//! MGRS parser: grid zone, 100 km square, paired digits.

use std::sync::OnceLock;

use regex::Regex;

use crate::coord::band::is_valid_band;
use crate::coord::{Format, Mgrs};
use crate::geodesy::column_valid_for_zone;

use super::ParseError;

/// Row letters never go past V; I and O are excluded everywhere.
fn is_square_letter(c: char) -> bool {
    c.is_ascii_alphabetic() && !matches!(c.to_ascii_uppercase(), 'I' | 'O')
}

fn mgrs_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Pattern breakdown:
        // (\d{1,2})      - zone number
        // ([A-Za-z])     - latitude band letter
        // ([A-Za-z]{2})  - 100 km grid-square column + row
        // (\d+)          - easting digits immediately followed by northing
        //                  digits, no internal separator
        // Whitespace is tolerated between letter groups but the band letter
        // must sit directly against the zone digits.
        Regex::new(r"^(\d{1,2})([A-Za-z])\s*([A-Za-z]{2})\s*(\d+)$").unwrap()
    })
}

/// Parses MGRS text such as `18TWL8562811322`.
///
/// The digit string splits in half: easting first, northing second, at
/// resolution `10^(5-precision)` meters per digit pair.
///
/// # Errors
///
/// `InvalidPrecision` for odd or oversized digit strings, `InvalidZone` /
/// `InvalidBand` for bad grid-zone designators, `GrammarMismatch` for
/// square letters that cannot occur in the zone.
pub fn parse(raw: &str) -> Result<Mgrs, ParseError> {
    let caps = mgrs_pattern()
        .captures(raw)
        .ok_or(ParseError::GrammarMismatch(Format::Mgrs))?;

    let zone: u32 = caps[1].parse().unwrap();
    if !(1..=60).contains(&zone) {
        return Err(ParseError::InvalidZone(zone));
    }
    let zone = zone as u8;

    let band = caps[2].chars().next().unwrap().to_ascii_uppercase();
    if !is_valid_band(band) {
        return Err(ParseError::InvalidBand(band));
    }

    let mut square = caps[3].chars().map(|c| c.to_ascii_uppercase());
    let column = square.next().unwrap();
    let row = square.next().unwrap();
    if !is_square_letter(column) || !is_square_letter(row) || row > 'V' {
        return Err(ParseError::GrammarMismatch(Format::Mgrs));
    }
    if !column_valid_for_zone(zone, column) {
        return Err(ParseError::GrammarMismatch(Format::Mgrs));
    }

    let digits = &caps[4];
    if digits.len() % 2 != 0 || digits.len() > 10 || digits.is_empty() {
        return Err(ParseError::InvalidPrecision(digits.len()));
    }
    let precision = (digits.len() / 2) as u8;

    let (easting_digits, northing_digits) = digits.split_at(digits.len() / 2);
    // At most 5 digits each, so u32 parse cannot fail.
    let easting: u32 = easting_digits.parse().unwrap();
    let northing: u32 = northing_digits.parse().unwrap();

    Ok(Mgrs {
        zone,
        band,
        column,
        row,
        easting,
        northing,
        precision,
    })
}
