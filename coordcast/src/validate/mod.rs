//! Input validation with actionable suggestions.
//!
//! Validation runs the format's parser and, on failure, turns the parse
//! error into a human-readable message plus at least one concrete
//! suggestion. The three numeric formats validate synchronously with no
//! I/O; word triples have an additional async, network-backed check
//! against the geocoding collaborator.

use serde::Serialize;

use crate::coord::Format;
use crate::geocode::Geocoder;
use crate::parse::{self, ParseError};

/// Outcome of a validation check.
///
/// `suggestions` is only populated when `valid` is false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<String>,
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            suggestions: Vec::new(),
        }
    }

    /// A failing result with an error message and suggestions.
    pub fn invalid(error: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            suggestions,
        }
    }
}

/// Suggestions keyed off the parse error, so every failure mode carries
/// concrete guidance.
fn suggestions_for(err: &ParseError) -> Vec<String> {
    match err {
        ParseError::GrammarMismatch(Format::LatLong) => vec![
            "use decimal degrees like 40.7128, -74.0060".to_string(),
            "or degree-minute-second like 40°42'46.08\"N 74°0'21.6\"W".to_string(),
        ],
        ParseError::GrammarMismatch(Format::Utm) => vec![
            "use zone, band, easting, northing like 18T 585628 4511322".to_string(),
        ],
        ParseError::GrammarMismatch(Format::Mgrs) => vec![
            "use a grid reference like 18TWL8562811322".to_string(),
            "grid square letters must be valid for the zone".to_string(),
        ],
        ParseError::GrammarMismatch(Format::Words) => vec![
            "use three dot-separated words like filled.count.soap".to_string(),
        ],
        ParseError::OutOfRange { quantity, .. } => match *quantity {
            "latitude" => vec!["latitude must be between -90 and 90".to_string()],
            "longitude" => vec!["longitude must be between -180 and 180".to_string()],
            _ => vec!["minutes and seconds must be below 60".to_string()],
        },
        ParseError::InvalidZone(_) => vec!["zone must be between 1 and 60".to_string()],
        ParseError::InvalidBand(_) => {
            vec!["band letters run C through X and skip I and O".to_string()]
        }
        ParseError::InvalidPrecision(_) => vec![
            "use an even number of digits, 2 to 10, split between easting and northing"
                .to_string(),
        ],
    }
}

/// Validates `raw` against `format` without touching the network.
///
/// For [`Format::Words`] this checks shape only; use [`validate_words`]
/// for the full provider-backed check.
pub fn validate(raw: &str, format: Format) -> ValidationResult {
    let text = raw.trim();
    if text.is_empty() {
        return ValidationResult::invalid(
            "input is empty",
            vec![format!("enter a {} coordinate", format)],
        );
    }

    match parse::parse(text, format) {
        Ok(_) => ValidationResult::ok(),
        Err(err) => ValidationResult::invalid(err.to_string(), suggestions_for(&err)),
    }
}

/// Validates a word triple against the geocoding collaborator.
///
/// Shape errors are reported as usual; for well-formed triples the
/// provider decides. Transient failures (network, rate limit) surface in
/// the error message so the caller can decide whether a retry makes sense.
pub async fn validate_words(raw: &str, geocoder: &dyn Geocoder) -> ValidationResult {
    let shape = validate(raw, Format::Words);
    if !shape.valid {
        return shape;
    }

    // Shape validation above guarantees this parse succeeds.
    let triple = parse::words::parse(raw.trim()).unwrap();
    match geocoder.resolve(&triple).await {
        Ok(_) => ValidationResult::ok(),
        Err(err) => {
            let suggestions = if err.is_transient() {
                vec!["try again in a moment".to_string()]
            } else {
                vec!["check the spelling of each word".to_string()]
            };
            ValidationResult::invalid(err.to_string(), suggestions)
        }
    }
}
