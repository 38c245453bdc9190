//! Coordinate data model.
//!
//! Defines the four supported notations and the [`Coordinate`] tagged union
//! that carries a parsed value together with the raw text it came from.
//! The MGRS latitude-band table lives in [`band`] and is the single source
//! of truth for hemisphere derivation.

pub mod band;

mod types;

pub use types::{
    Coordinate, CoordinateValue, Format, Hemisphere, LatLong, Mgrs, Utm, WordTriple, MAX_LAT,
    MAX_LNG, MIN_LAT, MIN_LNG,
};
