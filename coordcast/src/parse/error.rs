//! Parser error taxonomy.

use thiserror::Error;

use crate::coord::Format;

/// Errors produced by the per-format parsers.
///
/// These are user-input errors: they are returned as values, feed the
/// validator's suggestions, and are never fatal to engine state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input matches no known pattern for the selected format.
    #[error("input does not match any known {0} pattern")]
    GrammarMismatch(Format),

    /// A numeric component is outside the format's valid domain.
    #[error("{quantity} {value} is out of range ({min} to {max})")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// UTM zone outside 1-60.
    #[error("zone {0} is invalid: UTM zones run 1 through 60")]
    InvalidZone(u32),

    /// A letter that is not in the latitude-band table (includes I and O).
    #[error("'{0}' is not a latitude band letter (C through X, excluding I and O)")]
    InvalidBand(char),

    /// MGRS digit string whose length cannot split into easting/northing
    /// pairs.
    #[error("grid reference digits must come in pairs of equal halves: got {0} digit(s)")]
    InvalidPrecision(usize),
}

impl ParseError {
    /// Convenience constructor for latitude domain violations.
    pub(crate) fn latitude_out_of_range(value: f64) -> Self {
        ParseError::OutOfRange {
            quantity: "latitude",
            value,
            min: crate::coord::MIN_LAT,
            max: crate::coord::MAX_LAT,
        }
    }

    /// Convenience constructor for longitude domain violations.
    pub(crate) fn longitude_out_of_range(value: f64) -> Self {
        ParseError::OutOfRange {
            quantity: "longitude",
            value,
            min: crate::coord::MIN_LNG,
            max: crate::coord::MAX_LNG,
        }
    }
}
