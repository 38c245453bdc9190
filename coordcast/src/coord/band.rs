//! MGRS latitude-band table.
//!
//! Bands run C through X in 8 degree steps from 80S, skipping I and O;
//! band X is 12 degrees tall (72N-84N). Bands C-M lie in the southern
//! hemisphere, N-X in the northern. Hemisphere derivation goes through this
//! table, never through an alphabetic comparison against 'N'.

use super::Hemisphere;

/// Band letters south to north. Index i covers latitudes
/// `[-80 + 8*i, -80 + 8*(i+1))`, except X which extends to 84.
const BAND_LETTERS: [char; 20] = [
    'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V',
    'W', 'X',
];

/// Southernmost latitude covered by the band grid.
pub const BAND_MIN_LAT: f64 = -80.0;

/// Northernmost latitude covered by the band grid.
pub const BAND_MAX_LAT: f64 = 84.0;

/// Returns the index of `band` in the band table, or `None` for letters
/// that are not valid bands (including I and O).
fn band_index(band: char) -> Option<usize> {
    let upper = band.to_ascii_uppercase();
    BAND_LETTERS.iter().position(|&b| b == upper)
}

/// Returns true if `band` is a valid MGRS latitude-band letter.
pub fn is_valid_band(band: char) -> bool {
    band_index(band).is_some()
}

/// Derives the hemisphere from a latitude-band letter.
///
/// Bands C-M are southern, N-X northern. Returns `None` for invalid letters.
pub fn hemisphere_for_band(band: char) -> Option<Hemisphere> {
    band_index(band).map(|idx| {
        if idx < 10 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    })
}

/// Returns the band letter covering `lat`, or `None` outside 80S-84N.
pub fn band_for_latitude(lat: f64) -> Option<char> {
    if !(BAND_MIN_LAT..=BAND_MAX_LAT).contains(&lat) {
        return None;
    }
    let idx = (((lat - BAND_MIN_LAT) / 8.0) as usize).min(BAND_LETTERS.len() - 1);
    Some(BAND_LETTERS[idx])
}

/// Latitude range `[min, max)` covered by `band` (X is closed at 84).
pub fn band_latitude_range(band: char) -> Option<(f64, f64)> {
    band_index(band).map(|idx| {
        let min = BAND_MIN_LAT + 8.0 * idx as f64;
        let max = if idx == BAND_LETTERS.len() - 1 {
            BAND_MAX_LAT
        } else {
            min + 8.0
        };
        (min, max)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn southern_bands_derive_south() {
        for band in ['C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M'] {
            assert_eq!(
                hemisphere_for_band(band),
                Some(Hemisphere::South),
                "band {} should be southern",
                band
            );
        }
    }

    #[test]
    fn northern_bands_derive_north() {
        for band in ['N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X'] {
            assert_eq!(
                hemisphere_for_band(band),
                Some(Hemisphere::North),
                "band {} should be northern",
                band
            );
        }
    }

    #[test]
    fn i_and_o_are_not_bands() {
        assert!(!is_valid_band('I'));
        assert!(!is_valid_band('O'));
        assert_eq!(hemisphere_for_band('I'), None);
        assert_eq!(hemisphere_for_band('O'), None);
    }

    #[test]
    fn lowercase_letters_are_accepted() {
        assert_eq!(hemisphere_for_band('t'), Some(Hemisphere::North));
        assert_eq!(hemisphere_for_band('g'), Some(Hemisphere::South));
    }

    #[test]
    fn band_for_latitude_matches_table() {
        assert_eq!(band_for_latitude(-80.0), Some('C'));
        assert_eq!(band_for_latitude(-1.0), Some('M'));
        assert_eq!(band_for_latitude(0.0), Some('N'));
        assert_eq!(band_for_latitude(40.7128), Some('T'));
        assert_eq!(band_for_latitude(72.0), Some('X'));
        // X stretches 12 degrees up to 84
        assert_eq!(band_for_latitude(83.9), Some('X'));
        assert_eq!(band_for_latitude(84.0), Some('X'));
    }

    #[test]
    fn band_for_latitude_rejects_polar_latitudes() {
        assert_eq!(band_for_latitude(84.1), None);
        assert_eq!(band_for_latitude(-80.1), None);
        assert_eq!(band_for_latitude(90.0), None);
    }

    #[test]
    fn band_latitude_range_covers_eight_degrees() {
        assert_eq!(band_latitude_range('T'), Some((40.0, 48.0)));
        assert_eq!(band_latitude_range('C'), Some((-80.0, -72.0)));
        // X is the 12 degree band
        assert_eq!(band_latitude_range('X'), Some((72.0, 84.0)));
        assert_eq!(band_latitude_range('O'), None);
    }
}
