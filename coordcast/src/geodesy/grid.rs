//! MGRS 100 km grid-square encoding.
//!
//! MGRS identifies a 100 km square by a column letter (easting) and a row
//! letter (northing). Column letters run in 8-letter sets that repeat every
//! three zones; row letters cycle through a 20-letter alphabet every
//! 2,000 km, shifted by five letters in even zones. Decoding therefore has
//! to disambiguate which 2,000 km repeat a square belongs to, which is done
//! here by testing each candidate northing against the latitude band.

use super::{latlong_to_utm, utm_to_latlong, GeodesyError};
use crate::coord::band::{band_for_latitude, band_latitude_range, hemisphere_for_band};
use crate::coord::{LatLong, Mgrs, Utm};

/// Column alphabet: A-Z without I and O.
const COLUMN_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Row alphabet: A-V without I and O, cycling every 2,000 km.
const ROW_LETTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUV";

/// Northing span of one full row cycle in meters.
const ROW_CYCLE_METERS: f64 = 2_000_000.0;

/// Row-letter shift applied in even-numbered zones.
fn row_offset(zone: u8) -> usize {
    if zone % 2 == 0 {
        5
    } else {
        0
    }
}

/// Index of the first column letter for a zone's 8-letter set.
fn column_base(zone: u8) -> usize {
    ((zone as usize - 1) % 3) * 8
}

/// Returns true if `column` can occur in `zone`'s 8-letter column set.
pub fn column_valid_for_zone(zone: u8, column: char) -> bool {
    let base = column_base(zone);
    COLUMN_LETTERS[base..base + 8]
        .iter()
        .any(|&c| c as char == column.to_ascii_uppercase())
}

/// Encodes a UTM position as an MGRS reference.
///
/// `lat` supplies the latitude band; `precision` is the digit pairs per
/// axis (1-5). Digits are truncated, not rounded, so the reference names
/// the cell containing the position.
pub fn utm_to_mgrs(utm: &Utm, lat: f64, precision: u8) -> Result<Mgrs, GeodesyError> {
    debug_assert!((1..=5).contains(&precision));

    let band = band_for_latitude(lat).ok_or(GeodesyError::OutsideUtmCoverage(lat))?;

    let column_index = (utm.easting / 100_000.0).floor() as i64;
    if !(1..=8).contains(&column_index) {
        return Err(GeodesyError::EastingOutOfRange(utm.easting));
    }
    let column = COLUMN_LETTERS[column_base(utm.zone) + (column_index as usize - 1)] as char;

    let row_index =
        ((utm.northing / 100_000.0).floor() as i64).rem_euclid(ROW_LETTERS.len() as i64) as usize;
    let row = ROW_LETTERS[(row_index + row_offset(utm.zone)) % ROW_LETTERS.len()] as char;

    let resolution = 10u32.pow(5 - precision as u32);
    let easting = (utm.easting.rem_euclid(100_000.0) as u32) / resolution;
    let northing = (utm.northing.rem_euclid(100_000.0) as u32) / resolution;

    Ok(Mgrs {
        zone: utm.zone,
        band,
        column,
        row,
        easting,
        northing,
        precision,
    })
}

/// Decodes an MGRS reference into UTM.
///
/// The row letter only fixes the northing modulo 2,000 km; the candidate
/// whose inverse-projected latitude falls inside (or nearest to) the
/// reference's latitude band is selected.
pub fn mgrs_to_utm(mgrs: &Mgrs) -> Result<Utm, GeodesyError> {
    let hemisphere = hemisphere_for_band(mgrs.band)
        .ok_or(GeodesyError::InvalidGridSquare { zone: mgrs.zone })?;
    let (band_min, band_max) =
        band_latitude_range(mgrs.band).ok_or(GeodesyError::InvalidGridSquare { zone: mgrs.zone })?;

    let column_position = COLUMN_LETTERS
        .iter()
        .position(|&c| c as char == mgrs.column.to_ascii_uppercase())
        .ok_or(GeodesyError::InvalidGridSquare { zone: mgrs.zone })?;
    let column_index = column_position as i64 - column_base(mgrs.zone) as i64 + 1;
    if !(1..=8).contains(&column_index) {
        return Err(GeodesyError::InvalidGridSquare { zone: mgrs.zone });
    }

    let row_position = ROW_LETTERS
        .iter()
        .position(|&c| c as char == mgrs.row.to_ascii_uppercase())
        .ok_or(GeodesyError::InvalidGridSquare { zone: mgrs.zone })?;
    let row_index = (row_position + ROW_LETTERS.len() - row_offset(mgrs.zone)) % ROW_LETTERS.len();

    let resolution = f64::from(mgrs.resolution_meters());
    let easting = column_index as f64 * 100_000.0 + f64::from(mgrs.easting) * resolution;
    let base_northing = row_index as f64 * 100_000.0 + f64::from(mgrs.northing) * resolution;

    // Try each 2,000 km repeat and keep the candidate closest to the band.
    let mut best: Option<(f64, f64)> = None;
    for repeat in 0..5 {
        let northing = base_northing + ROW_CYCLE_METERS * repeat as f64;
        let candidate = Utm {
            zone: mgrs.zone,
            hemisphere,
            easting,
            northing,
        };
        let Ok(pos) = utm_to_latlong(&candidate) else {
            continue;
        };
        let distance = if pos.lat < band_min {
            band_min - pos.lat
        } else if pos.lat >= band_max {
            pos.lat - band_max
        } else {
            0.0
        };
        match best {
            Some((best_distance, _)) if best_distance <= distance => {}
            _ => best = Some((distance, northing)),
        }
    }

    let (_, northing) = best.ok_or(GeodesyError::InvalidGridSquare { zone: mgrs.zone })?;

    Ok(Utm {
        zone: mgrs.zone,
        hemisphere,
        easting,
        northing,
    })
}

/// Encodes a geographic position directly as MGRS.
pub fn latlong_to_mgrs(pos: &LatLong, precision: u8) -> Result<Mgrs, GeodesyError> {
    let utm = latlong_to_utm(pos)?;
    utm_to_mgrs(&utm, pos.lat, precision)
}

/// Decodes an MGRS reference to the geographic position of its cell origin.
pub fn mgrs_to_latlong(mgrs: &Mgrs) -> Result<LatLong, GeodesyError> {
    let utm = mgrs_to_utm(mgrs)?;
    utm_to_latlong(&utm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Hemisphere;

    fn mgrs(zone: u8, band: char, column: char, row: char, e: u32, n: u32, p: u8) -> Mgrs {
        Mgrs {
            zone,
            band,
            column,
            row,
            easting: e,
            northing: n,
            precision: p,
        }
    }

    #[test]
    fn decode_known_manhattan_reference() {
        let reference = mgrs(18, 'T', 'W', 'L', 85628, 11322, 5);
        let utm = mgrs_to_utm(&reference).unwrap();

        assert_eq!(utm.zone, 18);
        assert_eq!(utm.hemisphere, Hemisphere::North);
        assert_eq!(utm.easting, 585_628.0);
        assert_eq!(utm.northing, 4_511_322.0);
    }

    #[test]
    fn encode_new_york_lands_in_expected_square() {
        let nyc = LatLong::new(40.7128, -74.0060);
        let reference = latlong_to_mgrs(&nyc, 5).unwrap();

        assert_eq!(reference.grid_zone(), "18T");
        assert_eq!(reference.grid_square(), "WL");
        assert_eq!(reference.precision, 5);
        assert!(reference.easting < 100_000);
        assert!(reference.northing < 100_000);
    }

    #[test]
    fn encode_decode_round_trip_is_within_resolution() {
        let cases = [
            LatLong::new(40.7128, -74.0060),
            LatLong::new(51.5074, -0.1278),
            LatLong::new(-33.8688, 151.2093),
            LatLong::new(0.5, 0.5),
            LatLong::new(-45.0, 170.0),
        ];

        for pos in cases {
            for precision in [1u8, 3, 5] {
                let reference = latlong_to_mgrs(&pos, precision).unwrap();
                let back = mgrs_to_latlong(&reference).unwrap();

                // Truncation places the decoded point at the cell origin, so
                // the error is bounded by one cell diagonal.
                let cell = f64::from(reference.resolution_meters());
                let tolerance_degrees = cell * 2.0 / 100_000.0;
                assert!(
                    (back.lat - pos.lat).abs() < tolerance_degrees.max(1e-5),
                    "lat error for {} at precision {}",
                    pos,
                    precision
                );
                assert!(
                    (back.lng - pos.lng).abs() < (tolerance_degrees * 1.5).max(1e-5),
                    "lng error for {} at precision {}",
                    pos,
                    precision
                );
            }
        }
    }

    #[test]
    fn southern_hemisphere_reference_round_trips() {
        let sydney = LatLong::new(-33.8688, 151.2093);
        let reference = latlong_to_mgrs(&sydney, 5).unwrap();
        assert_eq!(reference.zone, 56);
        assert_eq!(reference.band, 'H');

        let utm = mgrs_to_utm(&reference).unwrap();
        assert_eq!(utm.hemisphere, Hemisphere::South);
        let back = utm_to_latlong(&utm).unwrap();
        assert!((back.lat - sydney.lat).abs() < 0.001);
        assert!((back.lng - sydney.lng).abs() < 0.001);
    }

    #[test]
    fn column_letters_repeat_every_three_zones() {
        // Zone 1 uses A-H, zone 2 J-R, zone 3 S-Z, zone 4 A-H again.
        let pos_z1 = LatLong::new(40.0, -177.0);
        let pos_z4 = LatLong::new(40.0, -159.0);
        let r1 = latlong_to_mgrs(&pos_z1, 5).unwrap();
        let r4 = latlong_to_mgrs(&pos_z4, 5).unwrap();
        assert_eq!(r1.zone, 1);
        assert_eq!(r4.zone, 4);
        assert_eq!(r1.column, r4.column);
    }

    #[test]
    fn foreign_column_letter_is_rejected() {
        // Zone 18 uses columns S-Z; 'A' belongs to a different set.
        let reference = mgrs(18, 'T', 'A', 'L', 0, 0, 1);
        assert_eq!(
            mgrs_to_utm(&reference),
            Err(GeodesyError::InvalidGridSquare { zone: 18 })
        );
    }

    #[test]
    fn coarse_precision_truncates_digits() {
        let nyc = LatLong::new(40.7128, -74.0060);
        let fine = latlong_to_mgrs(&nyc, 5).unwrap();
        let coarse = latlong_to_mgrs(&nyc, 2).unwrap();

        assert_eq!(coarse.precision, 2);
        assert_eq!(coarse.resolution_meters(), 1000);
        assert_eq!(coarse.easting, fine.easting / 1000);
        assert_eq!(coarse.northing, fine.northing / 1000);
    }
}
