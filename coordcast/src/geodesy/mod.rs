//! WGS84 geodesy kernels.
//!
//! Implements the transverse Mercator forward/inverse projection used by
//! UTM, plus the MGRS 100 km grid-square encoding in [`grid`]. All
//! functions are pure and synchronous; errors are values, never panics,
//! so the conversion engine can normalize them at its boundary.

mod grid;

pub use grid::{column_valid_for_zone, latlong_to_mgrs, mgrs_to_latlong, mgrs_to_utm, utm_to_mgrs};

use thiserror::Error;

use crate::coord::band::{band_for_latitude, BAND_MAX_LAT, BAND_MIN_LAT};
use crate::coord::{Hemisphere, LatLong, Utm};

/// WGS84 semi-major axis in meters.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// UTM central meridian scale factor.
const K0: f64 = 0.9996;
/// UTM false easting in meters.
const FALSE_EASTING: f64 = 500_000.0;
/// UTM false northing for the southern hemisphere in meters.
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// First eccentricity squared.
fn e2() -> f64 {
    WGS84_F * (2.0 - WGS84_F)
}

/// Second eccentricity squared.
fn ep2() -> f64 {
    let e2 = e2();
    e2 / (1.0 - e2)
}

/// Errors from the projection and grid kernels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodesyError {
    /// UTM and MGRS are defined between 80S and 84N only.
    #[error("latitude {0:.4} is outside UTM coverage ({min}S to {max}N)", min = -BAND_MIN_LAT, max = BAND_MAX_LAT)]
    OutsideUtmCoverage(f64),

    /// Easting too far from the central meridian to belong to any square.
    #[error("easting {0:.0} is outside the valid UTM range")]
    EastingOutOfRange(f64),

    /// Grid-square letters that cannot occur in the given zone.
    #[error("grid square letters are not valid for zone {zone}")]
    InvalidGridSquare { zone: u8 },

    /// The projection series produced NaN or infinity.
    #[error("projection produced a non-finite {0}")]
    NonFinite(&'static str),
}

/// Returns the UTM zone containing `lng`, with the antimeridian wrapping
/// into zone 1.
pub fn utm_zone_for(lng: f64) -> u8 {
    let zone = (((lng + 180.0) / 6.0).floor() as i32).rem_euclid(60) + 1;
    zone as u8
}

/// Central meridian of a UTM zone in degrees.
fn central_meridian(zone: u8) -> f64 {
    f64::from(zone - 1) * 6.0 - 180.0 + 3.0
}

/// Meridian arc length from the equator to `lat_rad`.
fn meridian_arc(lat_rad: f64) -> f64 {
    let e2 = e2();
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    WGS84_A
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat_rad
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat_rad).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat_rad).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * lat_rad).sin())
}

/// Projects a geographic position into UTM.
///
/// The zone is chosen from the longitude; the hemisphere from the latitude
/// sign. Fails with [`GeodesyError::OutsideUtmCoverage`] for latitudes the
/// band grid does not cover (above 84N or below 80S).
pub fn latlong_to_utm(pos: &LatLong) -> Result<Utm, GeodesyError> {
    if band_for_latitude(pos.lat).is_none() {
        return Err(GeodesyError::OutsideUtmCoverage(pos.lat));
    }

    let zone = utm_zone_for(pos.lng);
    let lat = pos.lat.to_radians();
    let lng = pos.lng.to_radians();
    let lng0 = central_meridian(zone).to_radians();

    let e2 = e2();
    let ep2 = ep2();

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let tan_lat = lat.tan();

    let n = WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = ep2 * cos_lat * cos_lat;
    let a = cos_lat * (lng - lng0);
    let m = meridian_arc(lat);

    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    let a6 = a5 * a;

    let easting = K0
        * n
        * (a + (1.0 - t + c) * a3 / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0)
        + FALSE_EASTING;

    let mut northing = K0
        * (m + n
            * tan_lat
            * (a2 / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

    let hemisphere = if pos.lat < 0.0 {
        northing += FALSE_NORTHING_SOUTH;
        Hemisphere::South
    } else {
        Hemisphere::North
    };

    if !easting.is_finite() {
        return Err(GeodesyError::NonFinite("easting"));
    }
    if !northing.is_finite() {
        return Err(GeodesyError::NonFinite("northing"));
    }

    Ok(Utm {
        zone,
        hemisphere,
        easting,
        northing,
    })
}

/// Inverse-projects a UTM coordinate back to latitude/longitude.
pub fn utm_to_latlong(utm: &Utm) -> Result<LatLong, GeodesyError> {
    let x = utm.easting - FALSE_EASTING;
    let y = match utm.hemisphere {
        Hemisphere::North => utm.northing,
        Hemisphere::South => utm.northing - FALSE_NORTHING_SOUTH,
    };

    let e2 = e2();
    let ep2 = ep2();
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

    let m = y / K0;
    let mu = m / (WGS84_A * (1.0 - e2 / 4.0 - 3.0 * e2 * e2 / 64.0 - 5.0 * e2 * e2 * e2 / 256.0));

    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_3 * e1;

    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let c1 = ep2 * cos_phi1 * cos_phi1;
    let t1 = tan_phi1 * tan_phi1;
    let n1 = WGS84_A / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
    let r1 = WGS84_A * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
    let d = x / (n1 * K0);

    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d3 * d;
    let d5 = d4 * d;
    let d6 = d5 * d;

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d6
                    / 720.0);

    let lng = central_meridian(utm.zone).to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d5
                / 120.0)
            / cos_phi1;

    let lat = lat.to_degrees();
    let lng = lng.to_degrees();

    if !lat.is_finite() {
        return Err(GeodesyError::NonFinite("latitude"));
    }
    if !lng.is_finite() {
        return Err(GeodesyError::NonFinite("longitude"));
    }

    Ok(LatLong::new(lat, lng))
}

/// Canonical UTM text, e.g. `18T 585628 4511322`.
///
/// The band letter comes from the caller because it is derived from the
/// latitude, which the [`Utm`] value alone does not carry.
pub fn utm_text(utm: &Utm, band: char) -> String {
    format!(
        "{}{} {:.0} {:.0}",
        utm.zone,
        band,
        utm.easting.round(),
        utm.northing.round()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nyc() -> LatLong {
        LatLong::new(40.7128, -74.0060)
    }

    #[test]
    fn zone_for_longitude() {
        assert_eq!(utm_zone_for(-74.0060), 18);
        assert_eq!(utm_zone_for(-180.0), 1);
        assert_eq!(utm_zone_for(179.999), 60);
        // Antimeridian wraps into zone 1
        assert_eq!(utm_zone_for(180.0), 1);
        assert_eq!(utm_zone_for(0.0), 31);
    }

    #[test]
    fn forward_projection_of_new_york() {
        let utm = latlong_to_utm(&nyc()).unwrap();
        assert_eq!(utm.zone, 18);
        assert_eq!(utm.hemisphere, Hemisphere::North);
        // ~583 km east, ~4507 km north
        assert!((583_000.0..585_000.0).contains(&utm.easting), "easting {}", utm.easting);
        assert!(
            (4_506_000.0..4_509_000.0).contains(&utm.northing),
            "northing {}",
            utm.northing
        );
    }

    #[test]
    fn forward_projection_of_sydney_is_southern() {
        let sydney = LatLong::new(-33.8688, 151.2093);
        let utm = latlong_to_utm(&sydney).unwrap();
        assert_eq!(utm.zone, 56);
        assert_eq!(utm.hemisphere, Hemisphere::South);
        // False northing applied: southern northings sit below 10,000 km
        assert!(utm.northing > 6_000_000.0 && utm.northing < 10_000_000.0);
    }

    #[test]
    fn round_trip_reproduces_position_within_tolerance() {
        let cases = [
            nyc(),
            LatLong::new(51.5074, -0.1278),
            LatLong::new(-33.8688, 151.2093),
            LatLong::new(0.1, 0.1),
            LatLong::new(-0.1, -0.1),
            LatLong::new(83.5, 10.0),
            LatLong::new(-79.5, -170.0),
        ];

        for pos in cases {
            let utm = latlong_to_utm(&pos).unwrap();
            let back = utm_to_latlong(&utm).unwrap();
            assert!(
                (back.lat - pos.lat).abs() < 1e-6,
                "lat round trip for {}: got {}",
                pos,
                back.lat
            );
            assert!(
                (back.lng - pos.lng).abs() < 1e-6,
                "lng round trip for {}: got {}",
                pos,
                back.lng
            );
        }
    }

    #[test]
    fn inverse_of_known_utm_lands_near_new_york() {
        let utm = Utm {
            zone: 18,
            hemisphere: Hemisphere::North,
            easting: 585_628.0,
            northing: 4_511_322.0,
        };
        let pos = utm_to_latlong(&utm).unwrap();
        assert!((40.5..41.0).contains(&pos.lat), "lat {}", pos.lat);
        assert!((-74.3..-73.7).contains(&pos.lng), "lng {}", pos.lng);

        // And projecting back reproduces the easting/northing to the meter.
        let reprojected = latlong_to_utm(&pos).unwrap();
        assert_eq!(reprojected.zone, 18);
        assert!((reprojected.easting - utm.easting).abs() < 1.0);
        assert!((reprojected.northing - utm.northing).abs() < 1.0);
    }

    #[test]
    fn polar_latitudes_are_outside_coverage() {
        assert_eq!(
            latlong_to_utm(&LatLong::new(84.1, 0.0)),
            Err(GeodesyError::OutsideUtmCoverage(84.1))
        );
        assert_eq!(
            latlong_to_utm(&LatLong::new(-80.5, 0.0)),
            Err(GeodesyError::OutsideUtmCoverage(-80.5))
        );
        assert!(latlong_to_utm(&LatLong::new(90.0, 0.0)).is_err());
    }

    #[test]
    fn coverage_boundaries_project() {
        assert!(latlong_to_utm(&LatLong::new(84.0, 0.0)).is_ok());
        assert!(latlong_to_utm(&LatLong::new(-80.0, 0.0)).is_ok());
    }

    #[test]
    fn utm_text_is_meter_rounded() {
        let utm = Utm {
            zone: 18,
            hemisphere: Hemisphere::North,
            easting: 585_628.4,
            northing: 4_511_321.6,
        };
        assert_eq!(utm_text(&utm, 'T'), "18T 585628 4511322");
    }
}
