//! Per-format coordinate parsers.
//!
//! Each submodule owns one notation's grammar and produces the matching
//! payload type; [`parse`] dispatches on [`Format`] and wraps the payload
//! into a [`Coordinate`] carrying the originating text. Parsers perform
//! range checks (latitude domain, zone bounds, digit pairing) but never
//! touch the network: word triples are validated for shape only, with
//! resolution left to the geocoding collaborator.

pub mod latlong;
pub mod mgrs;
pub mod utm;
pub mod words;

mod error;

pub use error::ParseError;

use crate::coord::{Coordinate, CoordinateValue, Format};

/// Parses `raw` according to `format`.
///
/// The input is expected to be pre-trimmed; the conversion engine trims and
/// rejects empty input before dispatching here.
pub fn parse(raw: &str, format: Format) -> Result<Coordinate, ParseError> {
    let value = match format {
        Format::LatLong => CoordinateValue::LatLong(latlong::parse(raw)?),
        Format::Utm => CoordinateValue::Utm(utm::parse(raw)?),
        Format::Mgrs => CoordinateValue::Mgrs(mgrs::parse(raw)?),
        Format::Words => CoordinateValue::Words(words::parse(raw)?),
    };
    Ok(Coordinate::new(raw, value))
}
