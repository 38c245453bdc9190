//! Coordinate type definitions.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Valid latitude range in degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range in degrees.
pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;

/// The four supported coordinate notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Decimal degrees or degree-minute-second latitude/longitude.
    LatLong,
    /// Universal Transverse Mercator zone/band easting/northing.
    Utm,
    /// Military Grid Reference System.
    Mgrs,
    /// Three dot-separated words resolved by an external provider.
    Words,
}

impl Format {
    /// All formats, in display order.
    pub const ALL: [Format; 4] = [Format::LatLong, Format::Utm, Format::Mgrs, Format::Words];

    /// Stable lowercase name used in cache keys and CLI arguments.
    pub fn name(&self) -> &'static str {
        match self {
            Format::LatLong => "latlong",
            Format::Utm => "utm",
            Format::Mgrs => "mgrs",
            Format::Words => "words",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latlong" | "latlng" | "latlon" => Ok(Format::LatLong),
            "utm" => Ok(Format::Utm),
            "mgrs" => Ok(Format::Mgrs),
            "words" | "w3w" => Ok(Format::Words),
            other => Err(format!(
                "unknown format '{}': expected latlong, utm, mgrs, or words",
                other
            )),
        }
    }
}

/// Hemisphere of a UTM coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Single-letter abbreviation (`N` or `S`).
    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLong {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl LatLong {
    /// Creates a new lat/long pair without range checking.
    ///
    /// Range enforcement belongs to the parsers and validator; this is a
    /// plain constructor for values already known to be in range.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if both components are inside the valid domain.
    pub fn in_range(&self) -> bool {
        (MIN_LAT..=MAX_LAT).contains(&self.lat) && (MIN_LNG..=MAX_LNG).contains(&self.lng)
    }
}

impl fmt::Display for LatLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Universal Transverse Mercator coordinate.
///
/// The hemisphere is derived from the latitude band at parse time (bands
/// C-M are southern, N-X northern); the band letter itself is part of the
/// raw text, not of this value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Utm {
    /// Longitudinal zone, 1-60.
    pub zone: u8,
    /// Hemisphere the northing is referenced to.
    pub hemisphere: Hemisphere,
    /// Easting in meters (false easting included).
    pub easting: f64,
    /// Northing in meters (false northing included for the south).
    pub northing: f64,
}

/// Military Grid Reference System coordinate.
///
/// `easting`/`northing` are the within-square digit values at the stored
/// precision, not full UTM meters: precision 5 means 1 m resolution,
/// precision 1 means 10 km.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mgrs {
    /// Longitudinal zone, 1-60.
    pub zone: u8,
    /// Latitude band letter, C-X excluding I and O.
    pub band: char,
    /// 100 km grid-square column letter.
    pub column: char,
    /// 100 km grid-square row letter.
    pub row: char,
    /// Easting digits within the grid square.
    pub easting: u32,
    /// Northing digits within the grid square.
    pub northing: u32,
    /// Digit pairs per axis, 1-5.
    pub precision: u8,
}

impl Mgrs {
    /// Grid zone designator, e.g. `18T`.
    pub fn grid_zone(&self) -> String {
        format!("{}{}", self.zone, self.band)
    }

    /// 100 km grid-square designator, e.g. `WL`.
    pub fn grid_square(&self) -> String {
        format!("{}{}", self.column, self.row)
    }

    /// Resolution of the stored digits in meters (`10^(5-precision)`).
    pub fn resolution_meters(&self) -> u32 {
        10u32.pow(5 - self.precision as u32)
    }
}

impl fmt::Display for Mgrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{:0width$}{:0width$}",
            self.zone,
            self.band,
            self.column,
            self.row,
            self.easting,
            self.northing,
            width = self.precision as usize
        )
    }
}

/// Three dot-separated word tokens, optionally resolved to a position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordTriple {
    /// The three tokens, in input order.
    pub words: [String; 3],
    /// Position resolved by the geocoding collaborator, when available.
    pub resolved: Option<LatLong>,
}

impl WordTriple {
    /// Canonical `a.b.c` form used for geocoder lookups and memoization.
    pub fn key(&self) -> String {
        format!(
            "{}.{}.{}",
            self.words[0].to_lowercase(),
            self.words[1].to_lowercase(),
            self.words[2].to_lowercase()
        )
    }

    /// Returns a copy with the resolved position attached.
    pub fn with_resolved(&self, position: LatLong) -> Self {
        Self {
            words: self.words.clone(),
            resolved: Some(position),
        }
    }
}

impl fmt::Display for WordTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.words[0], self.words[1], self.words[2])
    }
}

/// Format-specific payload of a [`Coordinate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    LatLong(LatLong),
    Utm(Utm),
    Mgrs(Mgrs),
    Words(WordTriple),
}

impl CoordinateValue {
    /// The format this value belongs to.
    pub fn format(&self) -> Format {
        match self {
            CoordinateValue::LatLong(_) => Format::LatLong,
            CoordinateValue::Utm(_) => Format::Utm,
            CoordinateValue::Mgrs(_) => Format::Mgrs,
            CoordinateValue::Words(_) => Format::Words,
        }
    }
}

/// A parsed coordinate: format-specific value plus the text it came from.
///
/// Created once on successful parse and immutable afterwards. The format
/// tag is derived from the value variant, so a tag/value mismatch is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinate {
    raw: String,
    #[serde(flatten)]
    value: CoordinateValue,
}

impl Coordinate {
    /// Creates a coordinate from its parsed value and originating text.
    pub fn new(raw: impl Into<String>, value: CoordinateValue) -> Self {
        Self {
            raw: raw.into(),
            value,
        }
    }

    /// The notation this coordinate is expressed in.
    pub fn format(&self) -> Format {
        self.value.format()
    }

    /// The text this coordinate was parsed from (or synthesized as, for
    /// derived equivalents).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The format-specific value.
    pub fn value(&self) -> &CoordinateValue {
        &self.value
    }

    /// The lat/long payload, if this is a lat/long coordinate.
    pub fn as_latlong(&self) -> Option<&LatLong> {
        match &self.value {
            CoordinateValue::LatLong(v) => Some(v),
            _ => None,
        }
    }

    /// The UTM payload, if this is a UTM coordinate.
    pub fn as_utm(&self) -> Option<&Utm> {
        match &self.value {
            CoordinateValue::Utm(v) => Some(v),
            _ => None,
        }
    }

    /// The MGRS payload, if this is an MGRS coordinate.
    pub fn as_mgrs(&self) -> Option<&Mgrs> {
        match &self.value {
            CoordinateValue::Mgrs(v) => Some(v),
            _ => None,
        }
    }

    /// The word-triple payload, if this is a words coordinate.
    pub fn as_words(&self) -> Option<&WordTriple> {
        match &self.value {
            CoordinateValue::Words(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
