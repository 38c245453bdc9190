//! The conversion pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, trace};

use crate::cache::{CacheStatsSnapshot, CachedConversion, ConversionCache};
use crate::coord::band::band_for_latitude;
use crate::coord::{Coordinate, CoordinateValue, Format, LatLong, Utm};
use crate::geocode::Geocoder;
use crate::geodesy::{self, GeodesyError};
use crate::parse;

use super::ConvertError;

/// Largest meaningful UTM northing (equator with southern false northing).
const MAX_NORTHING: f64 = 10_000_000.0;

/// Largest meaningful UTM easting within a zone.
const MAX_EASTING: f64 = 1_000_000.0;

/// MGRS digit pairs emitted for derived references.
const DERIVED_MGRS_PRECISION: u8 = 5;

/// Bound on concurrent geocoding requests.
const DEFAULT_GEOCODE_IN_FLIGHT: usize = 4;

/// Successful conversion: the parsed coordinate plus its equivalents.
///
/// `conversions` is keyed by format and includes the source format. UTM
/// and MGRS entries are absent for positions outside their coverage area;
/// the words entry is only present when the source was a word triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Coordinate parsed (and, for word triples, resolved) from the input.
    pub coordinate: Coordinate,
    /// Equivalent representations keyed by format.
    pub conversions: HashMap<Format, Coordinate>,
    /// True when the result came from the cache untouched.
    pub cache_hit: bool,
}

/// Result alias for engine operations.
pub type ConversionResult = Result<Conversion, ConvertError>;

/// Orchestrates detect-parse-validate-derive with a bounded cache in
/// front.
///
/// One engine instance is the cache's single writer; construct it once at
/// startup (see the service facade) and share it by `Arc`.
pub struct ConversionEngine {
    cache: ConversionCache,
    geocoder: Option<Arc<dyn Geocoder>>,
    geocode_permits: Arc<Semaphore>,
}

impl ConversionEngine {
    /// Creates an engine over `cache`, optionally wired to a geocoder for
    /// word-triple resolution.
    pub fn new(cache: ConversionCache, geocoder: Option<Arc<dyn Geocoder>>) -> Self {
        Self::with_geocode_bound(cache, geocoder, DEFAULT_GEOCODE_IN_FLIGHT)
    }

    /// Creates an engine with a custom bound on concurrent geocoding
    /// requests.
    pub fn with_geocode_bound(
        cache: ConversionCache,
        geocoder: Option<Arc<dyn Geocoder>>,
        max_in_flight: usize,
    ) -> Self {
        Self {
            cache,
            geocoder,
            geocode_permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    /// Converts `raw` interpreted as `format` into every representable
    /// notation.
    ///
    /// The three numeric formats never await; only word triples reach the
    /// geocoder. A failed conversion leaves the cache untouched.
    pub async fn convert(&self, raw: &str, format: Format) -> ConversionResult {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ConvertError::EmptyInput);
        }

        if let Some(hit) = self.cache.get(text, format) {
            trace!(%format, text, "conversion served from cache");
            return Ok(Conversion {
                coordinate: hit.source,
                conversions: hit.conversions,
                cache_hit: true,
            });
        }

        let parsed = parse::parse(text, format)?;
        check_invariants(&parsed)?;

        let (coordinate, conversions) = self.derive(parsed, text).await?;

        self.cache.put(
            text,
            format,
            CachedConversion {
                source: coordinate.clone(),
                conversions: conversions.clone(),
            },
        );

        Ok(Conversion {
            coordinate,
            conversions,
            cache_hit: false,
        })
    }

    /// Empties the conversion cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Cache counter snapshot, for diagnostics.
    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        self.cache.stats()
    }

    /// Derives the equivalents map for a parsed coordinate.
    ///
    /// Returns the (possibly resolved) source coordinate and the map.
    async fn derive(
        &self,
        parsed: Coordinate,
        text: &str,
    ) -> Result<(Coordinate, HashMap<Format, Coordinate>), ConvertError> {
        let mut conversions = HashMap::new();

        match parsed.value().clone() {
            CoordinateValue::LatLong(pos) => {
                conversions.insert(Format::LatLong, parsed.clone());
                project_equivalents(&pos, &mut conversions)?;
                Ok((parsed, conversions))
            }
            CoordinateValue::Utm(utm) => {
                check_utm_bounds(&utm)?;
                let pos = geodesy::utm_to_latlong(&utm).map_err(internal)?;
                if !pos.in_range() {
                    return Err(ConvertError::Internal(format!(
                        "inverse projection left the geographic domain: {}",
                        pos
                    )));
                }
                conversions.insert(Format::Utm, parsed.clone());
                conversions.insert(
                    Format::LatLong,
                    Coordinate::new(pos.to_string(), CoordinateValue::LatLong(pos)),
                );
                derive_mgrs_from_utm(&utm, pos.lat, &mut conversions);
                Ok((parsed, conversions))
            }
            CoordinateValue::Mgrs(mgrs) => {
                let utm = geodesy::mgrs_to_utm(&mgrs).map_err(internal)?;
                let pos = geodesy::utm_to_latlong(&utm).map_err(internal)?;
                if !pos.in_range() {
                    return Err(ConvertError::Internal(format!(
                        "inverse projection left the geographic domain: {}",
                        pos
                    )));
                }
                conversions.insert(Format::Mgrs, parsed.clone());
                conversions.insert(
                    Format::Utm,
                    Coordinate::new(
                        geodesy::utm_text(&utm, mgrs.band),
                        CoordinateValue::Utm(utm),
                    ),
                );
                conversions.insert(
                    Format::LatLong,
                    Coordinate::new(pos.to_string(), CoordinateValue::LatLong(pos)),
                );
                Ok((parsed, conversions))
            }
            CoordinateValue::Words(triple) => {
                let geocoder = self
                    .geocoder
                    .as_ref()
                    .ok_or(ConvertError::GeocoderUnavailable)?;

                // Bound concurrent lookups; the semaphore is never closed.
                let _permit = self
                    .geocode_permits
                    .acquire()
                    .await
                    .map_err(|e| ConvertError::Internal(e.to_string()))?;

                let pos = geocoder.resolve(&triple).await?;
                let resolved = Coordinate::new(
                    text,
                    CoordinateValue::Words(triple.with_resolved(pos)),
                );

                conversions.insert(Format::Words, resolved.clone());
                conversions.insert(
                    Format::LatLong,
                    Coordinate::new(pos.to_string(), CoordinateValue::LatLong(pos)),
                );
                project_equivalents(&pos, &mut conversions)?;
                Ok((resolved, conversions))
            }
        }
    }
}

/// Maps a geodesy failure into the internal-error normalization boundary.
fn internal(err: GeodesyError) -> ConvertError {
    ConvertError::Internal(err.to_string())
}

/// Re-checks parsed-value invariants before derivation.
///
/// The parsers already enforce these; this is the engine's validate step,
/// guarding against any future parser regression without re-parsing.
fn check_invariants(coordinate: &Coordinate) -> Result<(), ConvertError> {
    match coordinate.value() {
        CoordinateValue::LatLong(pos) => {
            if !pos.in_range() {
                return Err(ConvertError::Internal(format!(
                    "parsed position out of range: {}",
                    pos
                )));
            }
        }
        CoordinateValue::Utm(utm) => {
            if !(1..=60).contains(&utm.zone) || utm.easting < 0.0 || utm.northing < 0.0 {
                return Err(ConvertError::Internal(format!(
                    "parsed UTM violates invariants: zone {} e {} n {}",
                    utm.zone, utm.easting, utm.northing
                )));
            }
        }
        CoordinateValue::Mgrs(mgrs) => {
            let bound = 10u32.pow(mgrs.precision as u32);
            if !(1..=5).contains(&mgrs.precision) || mgrs.easting >= bound || mgrs.northing >= bound
            {
                return Err(ConvertError::Internal(format!(
                    "parsed MGRS violates invariants: {}",
                    mgrs
                )));
            }
        }
        CoordinateValue::Words(triple) => {
            if triple.words.iter().any(|w| w.is_empty()) {
                return Err(ConvertError::Internal("empty word token".to_string()));
            }
        }
    }
    Ok(())
}

/// Rejects grammatical-but-absurd UTM numbers before inverse projection.
fn check_utm_bounds(utm: &Utm) -> Result<(), ConvertError> {
    if utm.easting > MAX_EASTING {
        return Err(ConvertError::Parse(parse::ParseError::OutOfRange {
            quantity: "easting",
            value: utm.easting,
            min: 0.0,
            max: MAX_EASTING,
        }));
    }
    if utm.northing > MAX_NORTHING {
        return Err(ConvertError::Parse(parse::ParseError::OutOfRange {
            quantity: "northing",
            value: utm.northing,
            min: 0.0,
            max: MAX_NORTHING,
        }));
    }
    Ok(())
}

/// Adds UTM and MGRS equivalents for a geographic position.
///
/// Positions outside UTM coverage simply omit both entries; anything else
/// the projection reports is unexpected and normalizes to `Internal`.
fn project_equivalents(
    pos: &LatLong,
    conversions: &mut HashMap<Format, Coordinate>,
) -> Result<(), ConvertError> {
    let utm = match geodesy::latlong_to_utm(pos) {
        Ok(utm) => utm,
        Err(GeodesyError::OutsideUtmCoverage(lat)) => {
            debug!(lat, "position outside UTM coverage, omitting UTM/MGRS equivalents");
            return Ok(());
        }
        Err(other) => return Err(internal(other)),
    };

    // Coverage was just checked, so a band letter exists.
    let band = band_for_latitude(pos.lat).expect("band exists inside UTM coverage");
    conversions.insert(
        Format::Utm,
        Coordinate::new(geodesy::utm_text(&utm, band), CoordinateValue::Utm(utm)),
    );
    derive_mgrs_from_utm(&utm, pos.lat, conversions);
    Ok(())
}

/// Adds the MGRS equivalent for a UTM position when one exists.
fn derive_mgrs_from_utm(utm: &Utm, lat: f64, conversions: &mut HashMap<Format, Coordinate>) {
    match geodesy::utm_to_mgrs(utm, lat, DERIVED_MGRS_PRECISION) {
        Ok(mgrs) => {
            conversions.insert(
                Format::Mgrs,
                Coordinate::new(mgrs.to_string(), CoordinateValue::Mgrs(mgrs)),
            );
        }
        Err(err) => {
            debug!(%err, "omitting MGRS equivalent");
        }
    }
}
