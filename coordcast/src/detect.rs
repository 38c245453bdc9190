//! Coordinate format auto-detection.
//!
//! Applies fixed-priority pattern tests; first match wins. MGRS and UTM
//! overlap in their leading zone+letter token, so the denser MGRS shape
//! (no whitespace before the two grid-square letters) is tested first.
//! Anything that is not words, MGRS, or UTM falls through to lat/long,
//! whose parser then decides between decimal and DMS.

use std::sync::OnceLock;

use regex::Regex;

use crate::coord::Format;

fn words_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Three dot-separated alphanumeric tokens.
        Regex::new(r"^[A-Za-z0-9]+\.[A-Za-z0-9]+\.[A-Za-z0-9]+$").unwrap()
    })
}

fn mgrs_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Zone digits and band letter sit directly against the two-letter
        // grid square; that lack of whitespace is what separates the MGRS
        // shape from UTM.
        Regex::new(r"^\d{1,2}[A-Za-z][A-Za-z]{2}\s*\d+$").unwrap()
    })
}

fn utm_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Zone digits, one band letter, then two separate numeric groups.
        Regex::new(r"^\d{1,2}\s*[A-Za-z]\s+\d+(?:\.\d+)?\s+\d+(?:\.\d+)?$").unwrap()
    })
}

/// Guesses which notation `raw` is written in.
///
/// Returns `None` only for empty or all-whitespace input. The fallback is
/// [`Format::LatLong`]: detection never fails on non-empty text, the
/// lat/long parser reports the grammar mismatch instead.
pub fn detect(raw: &str) -> Option<Format> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if words_pattern().is_match(text) {
        return Some(Format::Words);
    }
    if mgrs_pattern().is_match(text) {
        return Some(Format::Mgrs);
    }
    if utm_pattern().is_match(text) {
        return Some(Format::Utm);
    }
    Some(Format::LatLong)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_detects_nothing() {
        assert_eq!(detect(""), None);
        assert_eq!(detect("   \t  "), None);
    }

    #[test]
    fn word_triples_win_first() {
        assert_eq!(detect("filled.count.soap"), Some(Format::Words));
        assert_eq!(detect("  abc.def.gh1  "), Some(Format::Words));
    }

    #[test]
    fn mgrs_beats_utm_on_the_shared_prefix() {
        assert_eq!(detect("18TWL8562811322"), Some(Format::Mgrs));
        assert_eq!(detect("18TWL 8562811322"), Some(Format::Mgrs));
        // Whitespace after the band letter reads as UTM, not MGRS.
        assert_eq!(detect("18T 585628 4511322"), Some(Format::Utm));
    }

    #[test]
    fn utm_requires_two_numeric_groups() {
        assert_eq!(detect("18T 585628 4511322"), Some(Format::Utm));
        assert_eq!(detect("56 H 334873 6252266"), Some(Format::Utm));
    }

    #[test]
    fn everything_else_falls_back_to_latlong() {
        assert_eq!(detect("40.7128, -74.0060"), Some(Format::LatLong));
        assert_eq!(detect("40°42'46.08\"N 74°0'21.6\"W"), Some(Format::LatLong));
        assert_eq!(detect("not a coordinate"), Some(Format::LatLong));
        assert_eq!(detect("90, 180"), Some(Format::LatLong));
    }

    #[test]
    fn decimal_pairs_are_not_mistaken_for_words() {
        // Dots inside decimal numbers do not form three alphanumeric
        // tokens because of the comma and sign characters.
        assert_eq!(detect("40.7128, -74.0060"), Some(Format::LatLong));
    }
}
